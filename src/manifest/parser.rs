//! Requirements-file parsing.
//!
//! Handles the line format understood by `pip install -r`: comments,
//! backslash continuations, option lines, direct references, extras,
//! version specifiers and environment markers.

use super::requirement::{Comparator, Requirement, VersionClause, VersionConstraint};
use super::ManifestEntry;
use regex::Regex;
use std::sync::LazyLock;

/// Distribution name, optional extras, and whatever follows.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[([^\]]*)\])?\s*(.*)$")
        .expect("NAME_REGEX must compile")
});

/// A single `<op><version>` clause.
static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(===|~=|==|!=|<=|>=|<|>)\s*([A-Za-z0-9.*+!_-]+)$")
        .expect("CLAUSE_REGEX must compile")
});

/// An extra name inside brackets.
static EXTRA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").expect("EXTRA_REGEX must compile")
});

/// A URL scheme at the start of a line (`https://`, `git+ssh://`).
static SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("SCHEME_REGEX must compile")
});

/// `#` at line start or after whitespace, to end of line.
static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s+)#.*$").expect("COMMENT_REGEX must compile"));

/// Options that must be followed by a value.
const VALUE_OPTIONS: &[&str] = &[
    "-r",
    "--requirement",
    "-c",
    "--constraint",
    "-e",
    "--editable",
    "-i",
    "--index-url",
    "--extra-index-url",
    "-f",
    "--find-links",
];

/// Suffixes pip installs as local archives.
const ARCHIVE_SUFFIXES: &[&str] = &[
    ".whl", ".zip", ".tar", ".tar.gz", ".tgz", ".tar.bz2", ".tbz", ".tar.xz", ".txz",
];

/// A parse failure at a given 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

/// Parse manifest text into entries.
pub fn parse_entries(content: &str) -> Result<Vec<ManifestEntry>, LineError> {
    let mut entries = Vec::new();
    let mut buffer = String::new();
    let mut start_line = 0;

    for (index, physical) in content.lines().enumerate() {
        if buffer.is_empty() {
            start_line = index + 1;
        }

        let trimmed = physical.trim_end();
        if let Some(joined) = trimmed.strip_suffix('\\') {
            buffer.push_str(joined);
            continue;
        }

        buffer.push_str(trimmed);
        if let Some(entry) = parse_line(&buffer, start_line)? {
            entries.push(entry);
        }
        buffer.clear();
    }

    // A continuation on the last line has nothing left to join.
    if !buffer.is_empty() {
        if let Some(entry) = parse_line(&buffer, start_line)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Parse one logical line; `None` for blank and comment-only lines.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<ManifestEntry>, LineError> {
    let stripped = COMMENT_REGEX.replace(raw, "");
    let text = stripped.trim();

    if text.is_empty() {
        return Ok(None);
    }

    if text.starts_with('-') {
        return parse_option(text, line).map(Some);
    }

    if is_location(text) {
        return Ok(Some(ManifestEntry::Location {
            reference: text.to_string(),
            line,
        }));
    }

    parse_requirement(text, line).map(|r| Some(ManifestEntry::Requirement(r)))
}

/// Paths, archives and URLs are installed without a name.
fn is_location(text: &str) -> bool {
    if text.starts_with('.') || text.starts_with('/') || SCHEME_REGEX.is_match(text) {
        return true;
    }
    let head = text
        .split(|c: char| c == '@' || c == ';' || c.is_whitespace())
        .next()
        .unwrap_or(text);
    let lower = head.to_ascii_lowercase();
    head.contains(['/', '\\']) || ARCHIVE_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

fn parse_option(text: &str, line: usize) -> Result<ManifestEntry, LineError> {
    let (flag, value) = match text.split_once(|c: char| c == '=' || c.is_whitespace()) {
        Some((flag, value)) => (flag, value.trim()),
        None => (text, ""),
    };

    if VALUE_OPTIONS.contains(&flag) && value.is_empty() {
        return Err(LineError {
            line,
            message: format!("option '{}' requires a value", flag),
        });
    }

    Ok(ManifestEntry::Option(text.to_string()))
}

/// Parse a `name[extras] <specifiers> ; <marker>` or `name @ url` line.
pub fn parse_requirement(text: &str, line: usize) -> Result<Requirement, LineError> {
    let err = |message: String| LineError { line, message };
    let (text, options) = split_trailing_options(text);
    if let Some(bare) = options.iter().find(|o| o.as_str() == "--hash") {
        return Err(err(format!("option '{}' requires a value", bare)));
    }

    let caps = NAME_REGEX
        .captures(text)
        .ok_or_else(|| err(format!("invalid requirement: '{}'", text)))?;

    let name = caps[1].to_string();
    let extras = match caps.get(2) {
        Some(m) => parse_extras(m.as_str()).map_err(err)?,
        None => Vec::new(),
    };
    let rest = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");

    if let Some(reference) = rest.strip_prefix('@') {
        let (url, marker) = split_url_marker(reference.trim());
        if url.is_empty() {
            return Err(err(format!("missing URL after '@' for '{}'", name)));
        }
        return Ok(Requirement {
            name,
            extras,
            constraint: None,
            url: Some(url.to_string()),
            marker: parse_marker(marker).map_err(err)?,
            options,
            line,
        });
    }

    let (spec, marker) = match rest.split_once(';') {
        Some((spec, marker)) => (spec.trim(), Some(marker)),
        None => (rest, None),
    };

    Ok(Requirement {
        name,
        extras,
        constraint: parse_constraint(spec).map_err(err)?,
        url: None,
        marker: parse_marker(marker).map_err(err)?,
        options,
        line,
    })
}

/// Split `--opt` tokens trailing a requirement from the specifier.
///
/// A token not starting with `--` is the value of the option before it.
fn split_trailing_options(text: &str) -> (&str, Vec<String>) {
    let start = text
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| text[i..].starts_with("--") && text[..i].ends_with(char::is_whitespace));
    let Some(start) = start else {
        return (text, Vec::new());
    };

    let mut options: Vec<String> = Vec::new();
    for token in text[start..].split_whitespace() {
        if !token.starts_with("--") {
            if let Some(last) = options.last_mut() {
                last.push(' ');
                last.push_str(token);
                continue;
            }
        }
        options.push(token.to_string());
    }
    (text[..start].trim_end(), options)
}

fn parse_extras(raw: &str) -> Result<Vec<String>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|extra| {
            if EXTRA_REGEX.is_match(extra) {
                Ok(extra.to_string())
            } else {
                Err(format!("invalid extra name: '{}'", extra))
            }
        })
        .collect()
}

/// Parse specifier text such as `>=1.0, <2` or the legacy `(>=1.0)`.
pub fn parse_constraint(spec: &str) -> Result<Option<VersionConstraint>, String> {
    let spec = spec
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(spec)
        .trim();

    if spec.is_empty() {
        return Ok(None);
    }

    let clauses = spec
        .split(',')
        .map(str::trim)
        .map(|clause| -> Result<VersionClause, String> {
            let caps = CLAUSE_REGEX
                .captures(clause)
                .ok_or_else(|| format!("invalid version specifier: '{}'", clause))?;
            let comparator: Comparator = caps[1].parse()?;
            Ok(VersionClause {
                comparator,
                version: caps[2].to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(VersionConstraint { clauses }))
}

fn parse_marker(marker: Option<&str>) -> Result<Option<String>, String> {
    match marker.map(str::trim) {
        None => Ok(None),
        Some("") => Err("empty environment marker after ';'".to_string()),
        Some(m) => Ok(Some(m.to_string())),
    }
}

/// URLs may contain `;`, so a marker needs whitespace before the separator.
fn split_url_marker(reference: &str) -> (&str, Option<&str>) {
    match reference.find(|c: char| c.is_whitespace()) {
        Some(pos) => {
            let (url, tail) = reference.split_at(pos);
            match tail.trim_start().strip_prefix(';') {
                Some(marker) => (url, Some(marker)),
                None => (reference, None),
            }
        }
        None => (reference, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(line: &str) -> Requirement {
        parse_requirement(line, 1).unwrap()
    }

    #[test]
    fn parses_bare_name() {
        let r = requirement("fastapi");
        assert_eq!(r.name, "fastapi");
        assert!(r.constraint.is_none());
        assert!(r.extras.is_empty());
    }

    #[test]
    fn parses_pinned_version() {
        let r = requirement("pandas==2.1.3");
        let constraint = r.constraint.unwrap();
        assert!(constraint.is_pinned());
        assert_eq!(constraint.to_string(), "==2.1.3");
    }

    #[test]
    fn parses_extras_and_ranges() {
        let r = requirement("uvicorn[standard, reload] >= 0.24, < 1.0");
        assert_eq!(r.extras, vec!["standard", "reload"]);
        assert_eq!(r.constraint.unwrap().to_string(), ">=0.24,<1.0");
    }

    #[test]
    fn parses_legacy_parenthesized_specifier() {
        let r = requirement("requests (>=2.31)");
        assert_eq!(r.constraint.unwrap().to_string(), ">=2.31");
    }

    #[test]
    fn parses_marker() {
        let r = requirement("pywin32>=306; sys_platform == \"win32\"");
        assert_eq!(r.marker.as_deref(), Some("sys_platform == \"win32\""));
        assert_eq!(r.constraint.unwrap().to_string(), ">=306");
    }

    #[test]
    fn parses_direct_reference() {
        let r = requirement("mylib @ https://example.com/mylib-1.0.tar.gz ; python_version > \"3.8\"");
        assert_eq!(r.url.as_deref(), Some("https://example.com/mylib-1.0.tar.gz"));
        assert_eq!(r.marker.as_deref(), Some("python_version > \"3.8\""));
    }

    #[test]
    fn rejects_unknown_comparator() {
        let err = parse_requirement("numpy => 1.0", 3).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("invalid version specifier"));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_requirement("numpy 1.0", 1).is_err());
    }

    #[test]
    fn rejects_empty_marker() {
        let err = parse_requirement("numpy;", 1).unwrap_err();
        assert!(err.message.contains("marker"));
    }

    #[test]
    fn rejects_missing_url() {
        assert!(parse_requirement("mylib @", 1).is_err());
    }

    #[test]
    fn rejects_bad_extra() {
        assert!(parse_requirement("uvicorn[-bad]", 1).is_err());
    }

    #[test]
    fn skips_comments_and_blanks() {
        let entries = parse_entries("# header\n\n   \nfastapi  # web framework\n").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn hash_inside_url_fragment_is_kept() {
        let entries = parse_entries("git+https://example.com/repo.git#egg=repo\n").unwrap();
        assert!(matches!(
            &entries[0],
            ManifestEntry::Location { reference, .. } if reference.ends_with("#egg=repo")
        ));
    }

    #[test]
    fn joins_continuation_lines() {
        let entries = parse_entries("sqlalchemy>=2.0,\\\n    <3\nnumpy\n").unwrap();
        assert_eq!(entries.len(), 2);
        match &entries[0] {
            ManifestEntry::Requirement(r) => {
                assert_eq!(r.line, 1);
                assert_eq!(r.constraint.as_ref().unwrap().to_string(), ">=2.0,<3");
            }
            other => panic!("expected requirement, got {:?}", other),
        }
        match &entries[1] {
            ManifestEntry::Requirement(r) => assert_eq!(r.line, 3),
            other => panic!("expected requirement, got {:?}", other),
        }
    }

    #[test]
    fn keeps_options() {
        let entries =
            parse_entries("--index-url https://pypi.org/simple\n-r base.txt\n-e ./local\n")
                .unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries
            .iter()
            .all(|e| matches!(e, ManifestEntry::Option(_))));
    }

    #[test]
    fn option_without_value_is_error() {
        let err = parse_entries("fastapi\n-r\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("'-r'"));
    }

    #[test]
    fn local_paths_are_locations() {
        let entries = parse_entries("./vendor/pkg\n/opt/wheels/x.whl\n").unwrap();
        assert!(entries
            .iter()
            .all(|e| matches!(e, ManifestEntry::Location { .. })));
    }

    #[test]
    fn keeps_hash_options_on_requirement() {
        let r = requirement("fastapi==0.104.1 --hash=sha256:abcdef0123 --hash sha256:987654");
        assert_eq!(r.constraint.unwrap().to_string(), "==0.104.1");
        assert_eq!(
            r.options,
            vec!["--hash=sha256:abcdef0123", "--hash sha256:987654"]
        );
    }

    #[test]
    fn hash_options_after_marker() {
        let r = requirement("pywin32==306 ; sys_platform == \"win32\" --hash=sha256:00ff");
        assert_eq!(r.marker.as_deref(), Some("sys_platform == \"win32\""));
        assert_eq!(r.options, vec!["--hash=sha256:00ff"]);
    }

    #[test]
    fn continued_hash_lines_join_into_one_requirement() {
        let content = "fastapi==0.104.1 \\\n    --hash=sha256:abcdef0123 \\\n    --hash=sha256:456789\nnumpy\n";
        let entries = parse_entries(content).unwrap();
        assert_eq!(entries.len(), 2);
        match &entries[0] {
            ManifestEntry::Requirement(r) => {
                assert_eq!(r.name, "fastapi");
                assert_eq!(r.options.len(), 2);
            }
            other => panic!("expected requirement, got {:?}", other),
        }
    }

    #[test]
    fn hash_without_value_is_error() {
        let err = parse_requirement("fastapi --hash", 4).unwrap_err();
        assert_eq!(err.line, 4);
        assert!(err.message.contains("'--hash'"));
    }

    #[test]
    fn relative_paths_and_archives_are_locations() {
        let entries = parse_entries(
            "wheels/mylib-1.0-py3-none-any.whl\nvendor\\pkg\nmylib-1.0.tar.gz\nsrc/pkg[extra]\n",
        )
        .unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries
            .iter()
            .all(|e| matches!(e, ManifestEntry::Location { .. })));
    }

    #[test]
    fn direct_reference_is_not_a_location() {
        let entries = parse_entries("mylib @ https://example.com/mylib-1.0.whl\n").unwrap();
        assert!(matches!(&entries[0], ManifestEntry::Requirement(r) if r.url.is_some()));
    }

    #[test]
    fn reports_line_of_bad_entry() {
        let err = parse_entries("fastapi\nuvicorn\nnot valid!\n").unwrap_err();
        assert_eq!(err.line, 3);
    }
}

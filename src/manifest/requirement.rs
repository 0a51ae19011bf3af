//! Dependency specifier types.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Version comparison operator in a specifier clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparator {
    /// `===` arbitrary equality.
    Arbitrary,
    /// `~=` compatible release.
    Compatible,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
}

impl Comparator {
    /// Operator text as written in a manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arbitrary => "===",
            Self::Compatible => "~=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
        }
    }
}

impl FromStr for Comparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "===" => Ok(Self::Arbitrary),
            "~=" => Ok(Self::Compatible),
            "==" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            "<=" => Ok(Self::LessEqual),
            ">=" => Ok(Self::GreaterEqual),
            "<" => Ok(Self::Less),
            ">" => Ok(Self::Greater),
            _ => Err(format!("unknown comparator: {}", s)),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<comparator><version>` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionClause {
    pub comparator: Comparator,
    pub version: String,
}

/// A comma-separated list of version clauses, all of which must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VersionConstraint {
    pub clauses: Vec<VersionClause>,
}

impl VersionConstraint {
    /// Whether the constraint pins a single exact version.
    pub fn is_pinned(&self) -> bool {
        matches!(
            self.clauses.as_slice(),
            [VersionClause {
                comparator: Comparator::Equal | Comparator::Arbitrary,
                version,
            }] if !version.contains('*')
        )
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .clauses
            .iter()
            .map(|c| format!("{}{}", c.comparator, c.version))
            .collect();
        f.write_str(&parts.join(","))
    }
}

/// A named dependency with optional extras, constraint, URL and marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Distribution name as written.
    pub name: String,

    /// Optional extras (`name[extra1,extra2]`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,

    /// Version constraint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<VersionConstraint>,

    /// Direct reference (`name @ url`), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Environment marker after `;`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// Per-requirement installer options (`--hash=sha256:...`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// 1-based line the requirement starts on.
    pub line: usize,
}

impl Requirement {
    /// Normalized name: lowercase with runs of `-`, `_`, `.` collapsed to `-`.
    pub fn normalized_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut last_sep = false;
        for c in self.name.chars() {
            if matches!(c, '-' | '_' | '.') {
                if !last_sep {
                    out.push('-');
                }
                last_sep = true;
            } else {
                out.push(c.to_ascii_lowercase());
                last_sep = false;
            }
        }
        out
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(url) = &self.url {
            write!(f, " @ {}", url)?;
        } else if let Some(constraint) = &self.constraint {
            write!(f, "{}", constraint)?;
        }
        if let Some(marker) = &self.marker {
            write!(f, "; {}", marker)?;
        }
        for option in &self.options {
            write!(f, " {}", option)?;
        }
        Ok(())
    }
}

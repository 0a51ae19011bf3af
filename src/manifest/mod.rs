//! Dependency manifest loading and validation.
//!
//! A manifest is a requirements file: one dependency specifier per line,
//! optionally with version constraints. It is parsed before any tool runs
//! so a missing or malformed file fails fast with the offending line.
//!
//! # Example
//!
//! ```
//! use provision::manifest::Manifest;
//! use std::path::Path;
//!
//! let manifest = Manifest::parse(
//!     Path::new("requirements.txt"),
//!     "fastapi==0.104.1\nuvicorn[standard]>=0.24\n",
//! ).unwrap();
//! assert_eq!(manifest.requirements().count(), 2);
//! ```

pub mod parser;
pub mod requirement;

pub use parser::{parse_constraint, parse_entries, parse_requirement, LineError};
pub use requirement::{Comparator, Requirement, VersionClause, VersionConstraint};

use crate::error::{ProvisionError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One logical line of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ManifestEntry {
    /// A named dependency.
    Requirement(Requirement),
    /// An installer option passed through as written (`-r base.txt`).
    Option(String),
    /// A local path or URL installed without a name.
    Location { reference: String, line: usize },
}

/// A parsed dependency manifest.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` if the file doesn't exist and
    /// `ManifestParse` for the first invalid line.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProvisionError::ManifestNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ProvisionError::DependencyResolution {
                    message: format!("cannot read manifest {}: {}", path.display(), e),
                    code: None,
                }
            }
        })?;

        Self::parse(path, &content)
    }

    /// Parse manifest text that was read from `path`.
    ///
    /// A leading UTF-8 byte-order mark is ignored.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let entries = parse_entries(content).map_err(|e| ProvisionError::ManifestParse {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Path the manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Named requirements in file order.
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter().filter_map(|e| match e {
            ManifestEntry::Requirement(r) => Some(r),
            _ => None,
        })
    }

    /// Installer option lines in file order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            ManifestEntry::Option(o) => Some(o.as_str()),
            _ => None,
        })
    }

    /// Number of things that will be installed (requirements and locations).
    pub fn install_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !matches!(e, ManifestEntry::Option(_)))
            .count()
    }

    /// Whether nothing would be installed.
    pub fn is_empty(&self) -> bool {
        self.install_count() == 0
    }

    /// Requirements listed more than once, keyed by normalized name, with
    /// the lines they appear on.
    pub fn duplicates(&self) -> BTreeMap<String, Vec<usize>> {
        let mut seen: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for r in self.requirements() {
            seen.entry(r.normalized_name()).or_default().push(r.line);
        }
        seen.retain(|_, lines| lines.len() > 1);
        seen
    }
}

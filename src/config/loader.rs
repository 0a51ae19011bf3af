//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! the project in the correct priority order.

use crate::config::schema::{ConfigFile, Overrides, ProvisionConfig};
use crate::error::{ProvisionError, Result};
use crate::shell::CommandSpec;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".provision";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.provision/config.yml`), or an explicit `--config` file
/// 2. Local overrides (`.provision/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .provision/config.yml (or the explicit file)
    pub project: Option<PathBuf>,

    /// Local overrides: .provision/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProvisionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProvisionError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ConfigFile`].
///
/// An empty or comment-only document yields the default (empty) file.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConfigFile> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ProvisionError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if value.is_null() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_value(value).map_err(|e| ProvisionError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the effective configuration for a project.
///
/// Starts from the built-in defaults, layers the config files on top, then
/// applies command-line overrides. When `config_override` is given it
/// replaces the project config and must exist.
pub fn load_config(
    project_root: &Path,
    config_override: Option<&Path>,
    overrides: &Overrides,
) -> Result<ProvisionConfig> {
    let mut paths = ConfigPaths::discover(project_root);
    if let Some(explicit) = config_override {
        if !explicit.exists() {
            return Err(ProvisionError::ConfigNotFound {
                path: explicit.to_path_buf(),
            });
        }
        paths.project = Some(explicit.to_path_buf());
    }

    let mut merged = ConfigFile::default();
    for path in paths.all_existing() {
        tracing::debug!("Loading config from {}", path.display());
        merged = merged.merge(load_config_file(path)?);
    }

    let mut config = ProvisionConfig::default();
    config.apply_file(merged);
    config.apply_overrides(overrides);

    validate(&config)?;
    Ok(config)
}

/// Check resolved values that serde cannot.
pub fn validate(config: &ProvisionConfig) -> Result<()> {
    if CommandSpec::parse(&config.package_manager).is_none() {
        return Err(ProvisionError::ConfigValidationError {
            message: "package_manager must not be empty".to_string(),
        });
    }
    if config.package_manager_package.trim().is_empty() {
        return Err(ProvisionError::ConfigValidationError {
            message: "package_manager_package must not be empty".to_string(),
        });
    }
    if config.manifest.as_os_str().is_empty() {
        return Err(ProvisionError::ConfigValidationError {
            message: "manifest must not be empty".to_string(),
        });
    }
    if config.target_dir.as_os_str().is_empty() {
        return Err(ProvisionError::ConfigValidationError {
            message: "target_dir must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");
        write_config(temp.path(), "config.local.yml", "");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn load_without_files_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None, &Overrides::default()).unwrap();
        assert_eq!(config, ProvisionConfig::default());
    }

    #[test]
    fn local_overrides_project() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "package_manager: pip3\ntarget_dir: out\n",
        );
        write_config(temp.path(), "config.local.yml", "target_dir: models\n");

        let config = load_config(temp.path(), None, &Overrides::default()).unwrap();
        assert_eq!(config.package_manager, "pip3");
        assert_eq!(config.target_dir, PathBuf::from("models"));
    }

    #[test]
    fn cli_overrides_files() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "manifest: prod.txt\n");

        let overrides = Overrides {
            manifest: Some(PathBuf::from("dev.txt")),
            ..Default::default()
        };
        let config = load_config(temp.path(), None, &overrides).unwrap();
        assert_eq!(config.manifest, PathBuf::from("dev.txt"));
    }

    #[test]
    fn explicit_config_replaces_project_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "manifest: prod.txt\n");
        let explicit = temp.path().join("ci.yml");
        fs::write(&explicit, "skip_upgrade: true\n").unwrap();

        let config = load_config(temp.path(), Some(&explicit), &Overrides::default()).unwrap();
        assert!(config.skip_upgrade);
        assert_eq!(config.manifest, PathBuf::from("requirements.txt"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = load_config(
            temp.path(),
            Some(&temp.path().join("missing.yml")),
            &Overrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "manifest: [unclosed\n");

        let err = load_config(temp.path(), None, &Overrides::default()).unwrap_err();
        match err {
            ProvisionError::ConfigParseError { path, .. } => {
                assert!(path.ends_with("config.yml"));
            }
            other => panic!("expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn comment_only_file_is_empty_config() {
        let file = parse_config("# nothing here\n", Path::new("c.yml")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn empty_package_manager_is_rejected() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "package_manager: '  '\n");

        let err = load_config(temp.path(), None, &Overrides::default()).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigValidationError { .. }));
    }
}

//! Configuration schema definitions.
//!
//! [`ConfigFile`] maps to a YAML file where every key is optional.
//! [`ProvisionConfig`] is the fully resolved configuration after layering
//! files and command-line overrides onto the built-in defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default package manager executable.
pub const DEFAULT_PACKAGE_MANAGER: &str = "pip";

/// Default dependency manifest, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Default directory to ensure, relative to the project root.
pub const DEFAULT_TARGET_DIR: &str = "data/models";

/// Contents of one configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Package manager command, e.g. `pip` or `python3 -m pip`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,

    /// Package name the upgrade step upgrades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager_package: Option<String>,

    /// Arguments placed before the package name when upgrading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_args: Option<Vec<String>>,

    /// Arguments placed before the manifest path when installing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_args: Option<Vec<String>>,

    /// Dependency manifest path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Directory to ensure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,

    /// Skip the package manager upgrade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_upgrade: Option<bool>,

    /// Extra environment variables for tool invocations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Layer `overlay` on top of `self`; set keys in `overlay` win and
    /// `env` maps are merged key by key.
    pub fn merge(mut self, overlay: ConfigFile) -> ConfigFile {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if overlay.$field.is_some() {
                    self.$field = overlay.$field;
                })*
            };
        }
        take!(
            package_manager,
            package_manager_package,
            upgrade_args,
            install_args,
            manifest,
            target_dir,
            skip_upgrade
        );
        self.env.extend(overlay.env);
        self
    }
}

/// Values supplied on the command line or through `PROVISION_*` variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub package_manager: Option<String>,
    pub manifest: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub skip_upgrade: bool,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionConfig {
    pub package_manager: String,
    pub package_manager_package: String,
    pub upgrade_args: Vec<String>,
    pub install_args: Vec<String>,
    pub manifest: PathBuf,
    pub target_dir: PathBuf,
    pub skip_upgrade: bool,
    pub env: BTreeMap<String, String>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            package_manager_package: DEFAULT_PACKAGE_MANAGER.to_string(),
            upgrade_args: vec!["install".to_string(), "--upgrade".to_string()],
            install_args: vec!["install".to_string(), "-r".to_string()],
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            skip_upgrade: false,
            env: BTreeMap::new(),
        }
    }
}

impl ProvisionConfig {
    /// Apply a (merged) config file on top of this configuration.
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(pm) = file.package_manager {
            self.package_manager = pm;
        }
        if let Some(pkg) = file.package_manager_package {
            self.package_manager_package = pkg;
        }
        if let Some(args) = file.upgrade_args {
            self.upgrade_args = args;
        }
        if let Some(args) = file.install_args {
            self.install_args = args;
        }
        if let Some(manifest) = file.manifest {
            self.manifest = manifest;
        }
        if let Some(dir) = file.target_dir {
            self.target_dir = dir;
        }
        if let Some(skip) = file.skip_upgrade {
            self.skip_upgrade = skip;
        }
        self.env.extend(file.env);
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(pm) = &overrides.package_manager {
            self.package_manager = pm.clone();
        }
        if let Some(manifest) = &overrides.manifest {
            self.manifest = manifest.clone();
        }
        if let Some(dir) = &overrides.target_dir {
            self.target_dir = dir.clone();
        }
        if overrides.skip_upgrade {
            self.skip_upgrade = true;
        }
    }

    /// Manifest path resolved against the project root.
    pub fn manifest_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.manifest)
    }

    /// Target directory resolved against the project root.
    pub fn target_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.target_dir)
    }
}

//! Configuration loading for provisioning.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, layering and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use provision::config::{load_config, Overrides};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".provision");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "target_dir: artifacts").unwrap();
//!
//! let config = load_config(temp.path(), None, &Overrides::default()).unwrap();
//! assert_eq!(config.target_dir, std::path::PathBuf::from("artifacts"));
//! assert_eq!(config.package_manager, "pip");
//! ```
//!
//! # Configuration File Locations
//!
//! Configuration is layered in this order:
//! 1. Built-in defaults (`pip`, `requirements.txt`, `data/models`)
//! 2. Project config (`.provision/config.yml`)
//! 3. Local overrides (`.provision/config.local.yml`)
//! 4. Command-line flags and `PROVISION_*` environment variables

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config, validate, ConfigPaths, CONFIG_DIR};
pub use schema::{
    ConfigFile, Overrides, ProvisionConfig, DEFAULT_MANIFEST, DEFAULT_PACKAGE_MANAGER,
    DEFAULT_TARGET_DIR,
};

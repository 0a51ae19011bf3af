//! provision - prepare a project's execution environment.
//!
//! Runs one linear, fail-fast procedure: upgrade the package manager,
//! install every dependency listed in a manifest, then ensure a target
//! directory exists. Running it again in a provisioned environment changes
//! nothing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered YAML configuration
//! - [`error`] - Error types and result aliases
//! - [`manifest`] - Dependency manifest parsing and validation
//! - [`runner`] - Ordered, fail-fast step pipeline
//! - [`shell`] - Tool invocation
//! - [`steps`] - The provisioning steps
//! - [`ui`] - Terminal output, spinners and run summaries
//!
//! # Example
//!
//! ```
//! use provision::config::ProvisionConfig;
//! use provision::runner::Pipeline;
//!
//! let config = ProvisionConfig::default();
//! let names: Vec<_> = Pipeline::standard(&config)
//!     .steps()
//!     .map(|s| s.name().to_string())
//!     .collect();
//! assert_eq!(names, ["upgrade", "install", "directories"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use error::{ProvisionError, Result};

//! Error types for provisioning.
//!
//! This module defines [`ProvisionError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every failure belongs to one [`ErrorClass`]: environment problems
//!   (toolchain or filesystem unavailable) or dependency resolution problems
//!   (manifest missing, invalid, or unsatisfiable)
//! - When a failure came from an external tool, its exit code travels with
//!   the error so the CLI can propagate it
//! - Use `anyhow::Error` (via `ProvisionError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Toolchain or filesystem unavailable, or not writable.
    #[error("Step '{step}' failed: {message}")]
    Environment {
        step: String,
        message: String,
        code: Option<i32>,
    },

    /// A dependency could not be resolved or installed.
    #[error("Dependency resolution failed: {message}")]
    DependencyResolution { message: String, code: Option<i32> },

    /// Manifest file does not exist.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest contains a line that is not a valid dependency specifier.
    #[error("Invalid manifest {path} (line {line}): {message}")]
    ManifestParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Broad category a [`ProvisionError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Toolchain or filesystem problem.
    Environment,
    /// Manifest missing, invalid, or a dependency is unsatisfiable.
    DependencyResolution,
    /// Configuration file problem.
    Configuration,
    /// Anything else.
    Internal,
}

impl ProvisionError {
    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Environment { .. } | Self::Io(_) => ErrorClass::Environment,
            Self::DependencyResolution { .. }
            | Self::ManifestNotFound { .. }
            | Self::ManifestParse { .. } => ErrorClass::DependencyResolution,
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigValidationError { .. } => ErrorClass::Configuration,
            Self::Other(_) => ErrorClass::Internal,
        }
    }

    /// Exit code of the external tool that caused this error, if any.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Self::Environment { code, .. } | Self::DependencyResolution { code, .. } => *code,
            _ => None,
        }
    }

    /// Process exit code to report for this error.
    ///
    /// The failing tool's code is propagated when it fits a process exit
    /// status; everything else exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self.tool_exit_code() {
            Some(code) if (1..=255).contains(&code) => code as u8,
            _ => 1,
        }
    }
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

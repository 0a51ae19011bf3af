//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Overrides;

/// Prepare a project environment: upgrade the package manager, install the
/// manifest's dependencies, create the target directory.
#[derive(Debug, Parser)]
#[command(name = "provision")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .provision/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output; tool output is shown only on failure
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the provisioning steps (default if no command specified)
    Run(RunArgs),

    /// Validate the manifest without running anything
    Check(CheckArgs),

    /// List the steps and the commands they run
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings that override the configuration files.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OverrideArgs {
    /// Dependency manifest to install from
    #[arg(long, global = true, value_name = "PATH", env = "PROVISION_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Directory to create
    #[arg(long, global = true, value_name = "PATH", env = "PROVISION_TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// Package manager command (e.g. "pip" or "python -m pip")
    #[arg(long, global = true, value_name = "CMD", env = "PROVISION_PACKAGE_MANAGER")]
    pub package_manager: Option<String>,

    /// Do not upgrade the package manager first
    #[arg(long, global = true)]
    pub skip_upgrade: bool,
}

impl OverrideArgs {
    /// Convert into configuration overrides.
    pub fn to_overrides(&self) -> Overrides {
        Overrides {
            package_manager: self.package_manager.clone(),
            manifest: self.manifest.clone(),
            target_dir: self.target_dir.clone(),
            skip_upgrade: self.skip_upgrade,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output the parsed manifest as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, Overrides, ProvisionConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command finds its configuration.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub project_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub overrides: Overrides,
}

impl ConfigSource {
    /// Source with no explicit config file and no overrides.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_path: None,
            overrides: Overrides::default(),
        }
    }

    /// Load and validate the effective configuration.
    pub fn load(&self) -> Result<ProvisionConfig> {
        load_config(
            &self.project_root,
            self.config_path.as_deref(),
            &self.overrides,
        )
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// No subcommand runs the provisioning steps with default arguments.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = ConfigSource {
            project_root: self.project_root.clone(),
            config_path: cli.config.clone(),
            overrides: cli.overrides.to_overrides(),
        };

        match &cli.command {
            Some(Commands::Run(args)) => super::run::RunCommand::new(source, args.clone()).execute(ui),
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(source, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(source, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::run::RunCommand::new(source, RunArgs::default()).execute(ui),
        }
    }
}

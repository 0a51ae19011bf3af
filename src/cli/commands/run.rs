//! Run command implementation.
//!
//! The `provision run` command (also the default) executes the provisioning
//! steps in order and stops at the first failure.

use crate::cli::args::RunArgs;
use crate::config::{ConfigPaths, ProvisionConfig};
use crate::error::{ProvisionError, Result};
use crate::runner::{Pipeline, StepContext};
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// Printed once every step has succeeded.
pub const COMPLETION_MESSAGE: &str = "Provisioning complete!";

/// The run command implementation.
pub struct RunCommand {
    source: ConfigSource,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(source: ConfigSource, args: RunArgs) -> Self {
        Self { source, args }
    }

    fn show_details(&self, config: &ProvisionConfig, ui: &mut dyn UserInterface) {
        let paths = ConfigPaths::discover(&self.source.project_root);
        let mut files: Vec<_> = paths.all_existing().into_iter().cloned().collect();
        if let Some(explicit) = &self.source.config_path {
            files.retain(|p| paths.project.as_ref() != Some(p));
            files.insert(0, explicit.clone());
        }
        for path in files {
            ui.message(&format!("Config: {}", path.display()));
        }
        ui.message(&format!("Project root: {}", self.source.project_root.display()));
        ui.message(&format!("Package manager: {}", config.package_manager));
        ui.message(&format!("Manifest: {}", config.manifest.display()));
        ui.message(&format!("Target directory: {}", config.target_dir.display()));
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.load()?;

        ui.show_header("provision");
        if ui.output_mode().shows_details() {
            self.show_details(&config, ui);
        }
        if self.args.dry_run {
            ui.message("Dry run: nothing will be changed");
        }

        let ctx = StepContext {
            project_root: &self.source.project_root,
            config: &config,
            dry_run: self.args.dry_run,
            capture_output: !ui.output_mode().streams_tool_output(),
        };

        let pipeline = Pipeline::standard(&config);
        tracing::debug!("Running {} step(s)", pipeline.len());
        let report = pipeline.run(&ctx, ui);
        ui.show_report(&report);

        match &report.error {
            None => {
                tracing::info!(
                    "Provisioning finished in {}",
                    format_duration(report.duration)
                );
                if self.args.dry_run {
                    ui.success("Dry run complete");
                } else {
                    ui.success(COMPLETION_MESSAGE);
                }
                Ok(CommandResult::success())
            }
            Some(error) => {
                let line = match error {
                    ProvisionError::Environment { .. } => error.to_string(),
                    _ => format!(
                        "Step '{}' failed: {}",
                        report.failed_step().unwrap_or("provision"),
                        error
                    ),
                };
                ui.error(&line);
                Ok(CommandResult::failure(report.exit_code()))
            }
        }
    }
}

//! Dependency installation from the manifest.

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::manifest::Manifest;
use crate::runner::{Step, StepContext, StepOutcome};
use crate::shell::CommandSpec;
use crate::ui::UserInterface;

use super::{exit_description, package_manager_command, run_tool};

/// Installs every dependency listed in the manifest.
///
/// The manifest is parsed first; a missing or malformed file fails the step
/// before the package manager is invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyInstaller;

impl DependencyInstaller {
    /// Step name.
    pub const NAME: &'static str = "install";

    /// The install command, e.g. `pip install -r requirements.txt`.
    ///
    /// The manifest path is passed as configured; the tool runs in the
    /// project root.
    pub fn command(config: &ProvisionConfig) -> Result<CommandSpec> {
        let spec = package_manager_command(config, &config.install_args)?;
        Ok(spec.arg(config.manifest.to_string_lossy().to_string()))
    }
}

impl Step for DependencyInstaller {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Install dependencies from the manifest"
    }

    fn preview(&self, ctx: &StepContext<'_>) -> String {
        Self::command(ctx.config)
            .map(|spec| spec.to_string())
            .unwrap_or_else(|e| e.to_string())
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let manifest = Manifest::load(&ctx.config.manifest_path(ctx.project_root))?;
        let count = manifest.install_count();
        tracing::debug!(
            "Manifest {} lists {} installable entries",
            manifest.path().display(),
            count
        );

        for (name, lines) in manifest.duplicates() {
            let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
            ui.warning(&format!(
                "'{}' is listed more than once (lines {})",
                name,
                lines.join(", ")
            ));
        }

        let spec = Self::command(ctx.config)?;
        let detail = format!("{} requirement{}", count, if count == 1 { "" } else { "s" });

        if ctx.dry_run {
            return Ok(StepOutcome::planned(Some(detail)));
        }

        let result = run_tool(&spec, ctx, ui).map_err(|e| ProvisionError::Environment {
            step: Self::NAME.to_string(),
            message: format!("could not launch '{}': {}", spec.program, e),
            code: None,
        })?;

        if !result.success {
            return Err(ProvisionError::DependencyResolution {
                message: exit_description(&spec, &result),
                code: result.exit_code,
            });
        }

        Ok(StepOutcome::completed(Some(detail)))
    }
}

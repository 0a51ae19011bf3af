//! Package manager self-upgrade.

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::runner::{Step, StepContext, StepOutcome};
use crate::shell::CommandSpec;
use crate::ui::UserInterface;

use super::{exit_description, package_manager_command, run_tool};

/// Upgrades the package manager to its latest version before it is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageManagerUpdater;

impl PackageManagerUpdater {
    /// Step name.
    pub const NAME: &'static str = "upgrade";

    /// The upgrade command, e.g. `pip install --upgrade pip`.
    pub fn command(config: &ProvisionConfig) -> Result<CommandSpec> {
        let spec = package_manager_command(config, &config.upgrade_args)?;
        Ok(spec.arg(config.package_manager_package.clone()))
    }

    fn environment_error(message: String, code: Option<i32>) -> ProvisionError {
        ProvisionError::Environment {
            step: Self::NAME.to_string(),
            message,
            code,
        }
    }
}

impl Step for PackageManagerUpdater {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Upgrade the package manager"
    }

    fn preview(&self, ctx: &StepContext<'_>) -> String {
        Self::command(ctx.config)
            .map(|spec| spec.to_string())
            .unwrap_or_else(|e| e.to_string())
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let spec = Self::command(ctx.config)?;

        if ctx.dry_run {
            return Ok(StepOutcome::planned(Some(spec.to_string())));
        }

        let result = run_tool(&spec, ctx, ui).map_err(|e| {
            Self::environment_error(format!("could not launch '{}': {}", spec.program, e), None)
        })?;

        if !result.success {
            return Err(Self::environment_error(
                exit_description(&spec, &result),
                result.exit_code,
            ));
        }

        Ok(StepOutcome::completed(None))
    }
}

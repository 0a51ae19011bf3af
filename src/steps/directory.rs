//! Target directory creation.

use std::fs;

use crate::error::{ProvisionError, Result};
use crate::runner::{Step, StepContext, StepOutcome};
use crate::shell::quote_arg;
use crate::ui::UserInterface;

/// Ensures the target directory and all missing ancestors exist.
///
/// An existing directory is left untouched, so running twice is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryEnsurer;

impl DirectoryEnsurer {
    /// Step name.
    pub const NAME: &'static str = "directories";

    fn environment_error(message: String) -> ProvisionError {
        ProvisionError::Environment {
            step: Self::NAME.to_string(),
            message,
            code: None,
        }
    }
}

impl Step for DirectoryEnsurer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Ensure the target directory exists"
    }

    fn preview(&self, ctx: &StepContext<'_>) -> String {
        format!(
            "mkdir -p {}",
            quote_arg(&ctx.config.target_dir.to_string_lossy())
        )
    }

    fn run(&self, ctx: &StepContext<'_>, _ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let target = ctx.config.target_path(ctx.project_root);

        if target.is_dir() {
            tracing::debug!("{} already exists", target.display());
            return Ok(StepOutcome::unchanged(Some("already present".to_string())));
        }

        if target.exists() {
            return Err(Self::environment_error(format!(
                "{} exists and is not a directory",
                target.display()
            )));
        }

        if ctx.dry_run {
            return Ok(StepOutcome::planned(Some(format!(
                "would create {}",
                ctx.config.target_dir.display()
            ))));
        }

        fs::create_dir_all(&target).map_err(|e| {
            Self::environment_error(format!("cannot create {}: {}", target.display(), e))
        })?;

        Ok(StepOutcome::completed(Some(format!(
            "created {}",
            ctx.config.target_dir.display()
        ))))
    }
}

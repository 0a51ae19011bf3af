//! The provisioning steps.
//!
//! - [`PackageManagerUpdater`] - upgrade the package manager itself
//! - [`DependencyInstaller`] - install everything the manifest lists
//! - [`DirectoryEnsurer`] - create the target directory and its parents
//!
//! Each step implements [`Step`](crate::runner::Step) and is run by the
//! [`Pipeline`](crate::runner::Pipeline).

pub mod directory;
pub mod install;
pub mod upgrade;

pub use directory::DirectoryEnsurer;
pub use install::DependencyInstaller;
pub use upgrade::PackageManagerUpdater;

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::runner::StepContext;
use crate::shell::{execute, CommandOptions, CommandResult, CommandSpec};
use crate::ui::UserInterface;

/// Package manager command with `args` appended.
pub(crate) fn package_manager_command(
    config: &ProvisionConfig,
    args: &[String],
) -> Result<CommandSpec> {
    let base = CommandSpec::parse(&config.package_manager).ok_or_else(|| {
        ProvisionError::ConfigValidationError {
            message: "package_manager must not be empty".to_string(),
        }
    })?;
    Ok(base.args(args.iter().cloned()))
}

/// Run a tool for a step.
///
/// Output streams straight to the terminal unless the context asks for
/// capture; captured output of a failed command is replayed verbatim.
pub(crate) fn run_tool(
    spec: &CommandSpec,
    ctx: &StepContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: Some(ctx.project_root.to_path_buf()),
        env: ctx.config.env.clone(),
        capture_stdout: ctx.capture_output,
        capture_stderr: ctx.capture_output,
    };

    if !ctx.capture_output {
        return execute(spec, &options);
    }

    let mut spinner = ui.start_spinner(&spec.to_string());
    let result = execute(spec, &options);
    match &result {
        Ok(r) if r.success => spinner.finish_success(&spec.to_string()),
        Ok(r) => {
            spinner.finish_error(&spec.to_string());
            ui.show_tool_output(&r.stdout, &r.stderr);
        }
        Err(_) => spinner.finish_error(&spec.to_string()),
    }
    result
}

/// Human-readable description of how a command ended.
pub(crate) fn exit_description(spec: &CommandSpec, result: &CommandResult) -> String {
    match result.exit_code {
        Some(code) => format!("`{}` exited with code {}", spec, code),
        None => format!("`{}` was terminated by a signal", spec),
    }
}

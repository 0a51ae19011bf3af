//! List command implementation.
//!
//! The `provision list` command shows the steps a run would perform and the
//! command each one executes.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::runner::{Pipeline, StepContext};
use crate::shell::{find_program, CommandSpec};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// One step as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepListing {
    pub name: String,
    pub description: String,
    pub command: String,
}

/// The list command implementation.
pub struct ListCommand {
    source: ConfigSource,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(source: ConfigSource, args: ListArgs) -> Self {
        Self { source, args }
    }

    /// Steps of the standard pipeline for `config`, in run order.
    pub fn listings(&self, config: &ProvisionConfig) -> Vec<StepListing> {
        let ctx = StepContext {
            project_root: &self.source.project_root,
            config,
            dry_run: true,
            capture_output: true,
        };
        Pipeline::standard(config)
            .steps()
            .map(|step| StepListing {
                name: step.name().to_string(),
                description: step.description().to_string(),
                command: step.preview(&ctx),
            })
            .collect()
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.load()?;
        let listings = self.listings(&config);

        if self.args.json {
            let json = serde_json::to_string_pretty(&listings)
                .map_err(|e| ProvisionError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        ui.message(&format!("  {}", theme.step_title.apply_to("Steps:")));
        for (index, listing) in listings.iter().enumerate() {
            ui.message(&format!(
                "    {} {} {}",
                theme.step_number.apply_to(format!("{}.", index + 1)),
                theme.step_title.apply_to(&listing.name),
                theme.command.apply_to(&listing.command)
            ));
            ui.message(&format!("       {}", theme.dim.apply_to(&listing.description)));
        }

        if let Some(spec) = CommandSpec::parse(&config.package_manager) {
            if find_program(&spec.program).is_none() {
                ui.warning(&format!("'{}' was not found on PATH", spec.program));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_standard_steps_in_order() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(ConfigSource::new(temp.path()), ListArgs::default());
        let config = ProvisionConfig::default();

        let names: Vec<_> = cmd.listings(&config).into_iter().map(|l| l.name).collect();

        assert_eq!(names, vec!["upgrade", "install", "directories"]);
    }

    #[test]
    fn shows_commands() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(ConfigSource::new(temp.path()), ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("pip install --upgrade pip"));
        assert!(ui.has_message("pip install -r requirements.txt"));
        assert!(ui.has_message("mkdir -p data/models"));
    }

    #[test]
    fn steps_are_styled_with_ui_theme() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(ConfigSource::new(temp.path()), ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui
            .messages()
            .contains(&"    1. upgrade pip install --upgrade pip".to_string()));
    }

    #[test]
    fn warns_when_package_manager_missing() {
        let temp = TempDir::new().unwrap();
        let mut source = ConfigSource::new(temp.path());
        source.overrides.package_manager = Some("no-such-tool-4b2e".to_string());
        let cmd = ListCommand::new(source, ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_warning("'no-such-tool-4b2e' was not found on PATH"));
    }

    #[test]
    fn json_respects_config_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".provision")).unwrap();
        fs::write(
            temp.path().join(".provision/config.yml"),
            "skip_upgrade: true\nmanifest: deps/base.txt\n",
        )
        .unwrap();
        let cmd = ListCommand::new(ConfigSource::new(temp.path()), ListArgs { json: true });
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        let steps = value.as_array().unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0]["name"], "install");
        assert_eq!(steps[0]["command"], "pip install -r deps/base.txt");
    }
}

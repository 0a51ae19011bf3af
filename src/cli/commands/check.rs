//! Check command implementation.
//!
//! The `provision check` command parses the manifest and reports what it
//! would install, without invoking any tool.

use crate::cli::args::CheckArgs;
use crate::error::{ErrorClass, ProvisionError, Result};
use crate::manifest::{Manifest, ManifestEntry};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The check command implementation.
pub struct CheckCommand {
    source: ConfigSource,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(source: ConfigSource, args: CheckArgs) -> Self {
        Self { source, args }
    }
}

fn describe(entry: &ManifestEntry) -> String {
    match entry {
        ManifestEntry::Requirement(req) => format!("  {:>4}  {}", req.line, req),
        ManifestEntry::Option(opt) => format!("        {}", opt),
        ManifestEntry::Location { reference, line } => format!("  {:>4}  {}", line, reference),
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.source.load()?;
        let path = config.manifest_path(&self.source.project_root);

        let manifest = match Manifest::load(&path) {
            Ok(m) => m,
            Err(e) if e.class() == ErrorClass::DependencyResolution => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&manifest)
                .map_err(|e| ProvisionError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        for entry in manifest.entries() {
            ui.message(&describe(entry));
        }
        for (name, lines) in manifest.duplicates() {
            let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
            ui.warning(&format!(
                "'{}' is listed more than once (lines {})",
                name,
                lines.join(", ")
            ));
        }

        let count = manifest.install_count();
        ui.success(&format!(
            "{} is valid: {} installable entr{}",
            config.manifest.display(),
            count,
            if count == 1 { "y" } else { "ies" }
        ));
        Ok(CommandResult::success())
    }
}

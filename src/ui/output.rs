//! Output verbosity.

use std::time::Duration;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including configuration details.
    Verbose,
    /// Show step progress, tool output and a summary.
    #[default]
    Normal,
    /// Capture tool output behind a spinner; show it only on failure.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows details such as config paths.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if tool output streams live to the terminal.
    pub fn streams_tool_output(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows step lines and the run summary.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Format a duration for display (`350ms`, `2.4s`, `1.5m`).
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

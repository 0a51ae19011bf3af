//! Visual theme and styling.

use console::Style;

/// Terminal styles for provisioning output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for step titles (bold).
    pub step_title: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for step counters (dim).
    pub step_number: Style,
    /// Style for durations (dim).
    pub duration: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            step_title: Style::new().bold(),
            header: Style::new().bold().magenta(),
            step_number: Style::new().dim(),
            duration: Style::new().dim(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            step_title: Style::new(),
            header: Style::new(),
            step_number: Style::new(),
            duration: Style::new(),
            command: Style::new(),
            border: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a step line: counter, name, and the command it runs.
    pub fn format_step(&self, current: usize, total: usize, name: &str, preview: &str) -> String {
        format!(
            "{} {} {}",
            self.step_number.apply_to(format!("[{}/{}]", current, total)),
            self.step_title.apply_to(format!("◆ {}", name)),
            self.command.apply_to(preview)
        )
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = Theme::plain().format_success("Complete");
        assert_eq!(msg, "✓ Complete");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = Theme::plain().format_warning("Caution");
        assert_eq!(msg, "⚠ Caution");
    }

    #[test]
    fn theme_formats_error() {
        let msg = Theme::plain().format_error("Failed");
        assert_eq!(msg, "✗ Failed");
    }

    #[test]
    fn theme_formats_step() {
        let msg = Theme::plain().format_step(2, 3, "install", "pip install -r requirements.txt");
        assert_eq!(msg, "[2/3] ◆ install pip install -r requirements.txt");
    }

    #[test]
    fn default_theme_creates_without_panic() {
        let theme = Theme::default();
        let _ = theme.format_header("Provisioning");
        let _ = theme.border.apply_to("│");
        let _ = theme.duration.apply_to("1.2s");
    }
}

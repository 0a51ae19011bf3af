//! Terminal output for provisioning runs.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] capturing every interaction for tests
//! - Themes, spinners and duration formatting
//!
//! # Example
//!
//! ```
//! use provision::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("provision");
//! ui.success("Provisioning complete!");
//! assert!(ui.has_success("Provisioning complete!"));
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::{format_duration, OutputMode};
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Theme};

use crate::runner::RunReport;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Get the theme output is styled with.
    fn theme(&self) -> &Theme;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Write machine-readable output (JSON) to stdout in every mode.
    fn output(&mut self, text: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Announce a step before it runs.
    fn show_step(&mut self, current: usize, total: usize, name: &str, preview: &str);

    /// Start a spinner for a running tool.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Replay captured output of a failed tool.
    fn show_tool_output(&mut self, stdout: &str, stderr: &str);

    /// Show the per-step summary of a finished run.
    fn show_report(&mut self, report: &RunReport);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

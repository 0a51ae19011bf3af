//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use provision::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_step(1, 3, "upgrade", "pip install --upgrade pip");
//! ui.warning("pip not found on PATH");
//!
//! assert_eq!(ui.steps_shown(), &[(1, 3)]);
//! assert!(ui.has_warning("not found"));
//! ```

use crate::runner::RunReport;

use super::{OutputMode, SpinnerHandle, Theme, UserInterface};

/// A step line as it was announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownStep {
    pub current: usize,
    pub total: usize,
    pub name: String,
    pub preview: String,
}

/// Summary of a report handed to [`UserInterface::show_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownReport {
    pub steps: Vec<String>,
    pub success: bool,
}

/// Mock UI implementation for testing.
#[derive(Debug)]
pub struct MockUI {
    mode: OutputMode,
    theme: Theme,
    messages: Vec<String>,
    outputs: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<ShownStep>,
    step_counters: Vec<(usize, usize)>,
    spinners: Vec<String>,
    tool_output: Vec<(String, String)>,
    reports: Vec<ShownReport>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::with_mode(OutputMode::Normal)
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: Theme::plain(),
            messages: Vec::new(),
            outputs: Vec::new(),
            successes: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            headers: Vec::new(),
            steps: Vec::new(),
            step_counters: Vec::new(),
            spinners: Vec::new(),
            tool_output: Vec::new(),
            reports: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Machine-readable output, one entry per call.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Every announced step, in order.
    pub fn steps(&self) -> &[ShownStep] {
        &self.steps
    }

    /// `(current, total)` counters of announced steps.
    pub fn steps_shown(&self) -> &[(usize, usize)] {
        &self.step_counters
    }

    /// Messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Replayed `(stdout, stderr)` pairs.
    pub fn tool_output(&self) -> &[(String, String)] {
        &self.tool_output
    }

    pub fn reports_shown(&self) -> &[ShownReport] {
        &self.reports
    }

    /// Check if any message contains the given text.
    pub fn has_message(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.contains(text))
    }

    /// Check if any success message contains the given text.
    pub fn has_success(&self, text: &str) -> bool {
        self.successes.iter().any(|m| m.contains(text))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(text))
    }

    /// Check if any error contains the given text.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|m| m.contains(text))
    }

    /// Check if any replayed tool output contains the given text.
    pub fn has_tool_output(&self, text: &str) -> bool {
        self.tool_output
            .iter()
            .any(|(out, err)| out.contains(text) || err.contains(text))
    }
}

impl Default for MockUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, preview: &str) {
        self.step_counters.push((current, total));
        self.steps.push(ShownStep {
            current,
            total,
            name: name.to_string(),
            preview: preview.to_string(),
        });
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn show_tool_output(&mut self, stdout: &str, stderr: &str) {
        self.tool_output
            .push((stdout.to_string(), stderr.to_string()));
    }

    fn show_report(&mut self, report: &RunReport) {
        self.reports.push(ShownReport {
            steps: report.records.iter().map(|r| r.name.clone()).collect(),
            success: report.success(),
        });
    }
}

/// Spinner that draws nothing.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, _msg: &str) {}

    fn finish_error(&mut self, _msg: &str) {}
}

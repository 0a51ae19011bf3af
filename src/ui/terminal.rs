//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::runner::RunReport;
use crate::shell::is_ci;

use super::output::format_duration;
use super::{OutputMode, ProgressSpinner, SpinnerHandle, Theme, UserInterface};

/// Terminal UI implementation.
///
/// Progress goes to stdout; warnings, errors and replayed tool output go to
/// stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI with the given theme.
    pub fn new(mode: OutputMode, theme: Theme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    fn write_block(&mut self, title: &str, text: &str) {
        let b = &self.theme.border;
        writeln!(
            self.err,
            "    {} {}",
            b.apply_to("┌─"),
            b.apply_to(format!("{} ──────────────────────────", title))
        )
        .ok();
        for line in text.lines() {
            writeln!(self.err, "    {} {}", b.apply_to("│"), line).ok();
        }
        writeln!(
            self.err,
            "    {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn output(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, preview: &str) {
        if self.mode.shows_progress() {
            writeln!(
                self.out,
                "{}",
                self.theme.format_step(current, total, name, preview)
            )
            .ok();
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.out.is_term() && !is_ci() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_tool_output(&mut self, stdout: &str, stderr: &str) {
        if !stdout.trim().is_empty() {
            self.write_block("stdout", stdout);
        }
        if !stderr.trim().is_empty() {
            self.write_block("stderr", stderr);
        }
    }

    fn show_report(&mut self, report: &RunReport) {
        if !self.mode.shows_progress() {
            return;
        }

        let b = &self.theme.border;

        writeln!(self.out).ok();
        writeln!(
            self.out,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for record in &report.records {
            let icon = record.status.display_char();
            let icon = if record.status.is_success() {
                self.theme.success.apply_to(icon)
            } else {
                self.theme.error.apply_to(icon)
            };
            let detail = record.detail.as_deref().unwrap_or("");

            writeln!(
                self.out,
                "  {} {} {:<12} {:>8}  {}",
                b.apply_to("│"),
                icon,
                record.name,
                self.theme.duration.apply_to(format_duration(record.duration)),
                self.theme.dim.apply_to(detail),
            )
            .ok();
        }

        writeln!(
            self.out,
            "  {}",
            b.apply_to("├────────────────────────────────────")
        )
        .ok();
        writeln!(
            self.out,
            "  {} Total: {} {} {} step{} run",
            b.apply_to("│"),
            self.theme.duration.apply_to(format_duration(report.duration)),
            self.theme.dim.apply_to("·"),
            report.records.len(),
            if report.records.len() == 1 { "" } else { "s" },
        )
        .ok();
        writeln!(
            self.out,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }
}

/// Create the terminal UI for a mode.
///
/// Colors are used only when `color` is set and the terminal supports them.
pub fn create_ui(mode: OutputMode, color: bool) -> Box<dyn UserInterface> {
    let theme = if color { Theme::detect() } else { Theme::plain() };
    Box::new(TerminalUI::new(mode, theme))
}

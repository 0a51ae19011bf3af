//! Ordered, fail-fast step pipeline.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::steps::{DependencyInstaller, DirectoryEnsurer, PackageManagerUpdater};
use crate::ui::UserInterface;

/// Everything a step needs to run.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Directory relative paths resolve against.
    pub project_root: &'a Path,

    /// Resolved configuration.
    pub config: &'a ProvisionConfig,

    /// Report what would happen without touching the environment.
    pub dry_run: bool,

    /// Capture tool output instead of letting it stream to the terminal.
    pub capture_output: bool,
}

/// Final state of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step ran and changed the environment (or may have).
    Completed,
    /// Step found nothing to do.
    Unchanged,
    /// Step failed; the run stopped here.
    Failed,
    /// Dry run: step would have run.
    Planned,
}

impl StepStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            StepStatus::Completed => '✓',
            StepStatus::Unchanged => '○',
            StepStatus::Failed => '✗',
            StepStatus::Planned => '◇',
        }
    }

    /// Whether the step ended without error.
    pub fn is_success(&self) -> bool {
        !matches!(self, StepStatus::Failed)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Unchanged => "unchanged",
            StepStatus::Failed => "failed",
            StepStatus::Planned => "planned",
        };
        write!(f, "{}", s)
    }
}

/// What a successful step reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub status: StepStatus,
    pub detail: Option<String>,
}

impl StepOutcome {
    /// The step changed the environment.
    pub fn completed(detail: Option<String>) -> Self {
        Self {
            status: StepStatus::Completed,
            detail,
        }
    }

    /// The step had nothing to do.
    pub fn unchanged(detail: Option<String>) -> Self {
        Self {
            status: StepStatus::Unchanged,
            detail,
        }
    }

    /// Dry run: the step would have run.
    pub fn planned(detail: Option<String>) -> Self {
        Self {
            status: StepStatus::Planned,
            detail,
        }
    }
}

/// A named, one-shot provisioning action.
pub trait Step {
    /// Short identifier (`upgrade`, `install`, `directories`).
    fn name(&self) -> &str;

    /// One-line human description.
    fn description(&self) -> &str;

    /// What the step will do, e.g. the command line it runs.
    fn preview(&self, ctx: &StepContext<'_>) -> String;

    /// Perform the step.
    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome>;
}

/// Record of one step in a run.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub duration: Duration,
    pub detail: Option<String>,
}

/// Result of running a pipeline.
///
/// `records` holds every step that was started, in order. When a step
/// fails it is the last record and `error` holds the cause.
#[derive(Debug)]
pub struct RunReport {
    pub records: Vec<StepRecord>,
    pub duration: Duration,
    pub error: Option<ProvisionError>,
}

impl RunReport {
    /// Whether every step succeeded.
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Name of the step that failed, if any.
    pub fn failed_step(&self) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.status == StepStatus::Failed)
            .map(|r| r.name.as_str())
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> u8 {
        self.error.as_ref().map_or(0, ProvisionError::exit_code)
    }

    /// Names of steps that were started, in order.
    pub fn started(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Ordered list of steps run with fail-fast semantics.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard provisioning pipeline: upgrade, install, directories.
    ///
    /// The upgrade step is left out when `skip_upgrade` is set.
    pub fn standard(config: &ProvisionConfig) -> Self {
        let mut pipeline = Self::new();
        if !config.skip_upgrade {
            pipeline = pipeline.with_step(PackageManagerUpdater);
        }
        pipeline
            .with_step(DependencyInstaller)
            .with_step(DirectoryEnsurer)
    }

    /// Append a step.
    pub fn with_step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Steps in execution order.
    pub fn steps(&self) -> impl Iterator<Item = &dyn Step> {
        self.steps.iter().map(|s| s.as_ref())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// Steps after a failure are never started and nothing is undone.
    pub fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> RunReport {
        let run_start = Instant::now();
        let total = self.steps.len();
        let mut records = Vec::with_capacity(total);

        for (index, step) in self.steps.iter().enumerate() {
            let preview = step.preview(ctx);
            ui.show_step(index + 1, total, step.name(), &preview);
            tracing::debug!("Starting step '{}': {}", step.name(), preview);

            let start = Instant::now();
            match step.run(ctx, ui) {
                Ok(outcome) => {
                    tracing::info!("Step '{}' {}", step.name(), outcome.status);
                    records.push(StepRecord {
                        name: step.name().to_string(),
                        status: outcome.status,
                        duration: start.elapsed(),
                        detail: outcome.detail,
                    });
                }
                Err(error) => {
                    tracing::warn!("Step '{}' failed, aborting: {}", step.name(), error);
                    records.push(StepRecord {
                        name: step.name().to_string(),
                        status: StepStatus::Failed,
                        duration: start.elapsed(),
                        detail: Some(error.to_string()),
                    });
                    return RunReport {
                        records,
                        duration: run_start.elapsed(),
                        error: Some(error),
                    };
                }
            }
        }

        RunReport {
            records,
            duration: run_start.elapsed(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        name: &'static str,
        fail_with: Option<i32>,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Step for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "records that it ran"
        }

        fn preview(&self, _ctx: &StepContext<'_>) -> String {
            format!("record {}", self.name)
        }

        fn run(&self, _ctx: &StepContext<'_>, _ui: &mut dyn UserInterface) -> Result<StepOutcome> {
            self.log.borrow_mut().push(self.name);
            match self.fail_with {
                Some(code) => Err(ProvisionError::Environment {
                    step: self.name.to_string(),
                    message: "boom".to_string(),
                    code: Some(code),
                }),
                None => Ok(StepOutcome::completed(None)),
            }
        }
    }

    fn recording(
        name: &'static str,
        fail_with: Option<i32>,
        log: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Recording {
        Recording {
            name,
            fail_with,
            log: Rc::clone(log),
        }
    }

    fn ctx(config: &ProvisionConfig) -> StepContext<'_> {
        StepContext {
            project_root: Path::new("."),
            config,
            dry_run: false,
            capture_output: true,
        }
    }

    #[test]
    fn runs_steps_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with_step(recording("a", None, &log))
            .with_step(recording("b", None, &log))
            .with_step(recording("c", None, &log));

        let config = ProvisionConfig::default();
        let mut ui = MockUI::new();
        let report = pipeline.run(&ctx(&config), &mut ui);

        assert!(report.success());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(report.started(), vec!["a", "b", "c"]);
        assert_eq!(ui.steps_shown(), &[(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn stops_at_first_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with_step(recording("a", None, &log))
            .with_step(recording("b", Some(4), &log))
            .with_step(recording("c", None, &log));

        let config = ProvisionConfig::default();
        let mut ui = MockUI::new();
        let report = pipeline.run(&ctx(&config), &mut ui);

        assert!(!report.success());
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(report.failed_step(), Some("b"));
        assert_eq!(report.exit_code(), 4);
        assert_eq!(report.records.last().unwrap().status, StepStatus::Failed);
    }

    #[test]
    fn failing_first_step_runs_nothing_else() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with_step(recording("upgrade", Some(1), &log))
            .with_step(recording("install", None, &log));

        let config = ProvisionConfig::default();
        let mut ui = MockUI::new();
        let report = pipeline.run(&ctx(&config), &mut ui);

        assert_eq!(*log.borrow(), vec!["upgrade"]);
        assert!(!report.success());
        assert_eq!(report.failed_step(), Some("upgrade"));
    }

    #[test]
    fn empty_pipeline_succeeds() {
        let config = ProvisionConfig::default();
        let mut ui = MockUI::new();
        let report = Pipeline::new().run(&ctx(&config), &mut ui);
        assert!(report.success());
        assert!(report.records.is_empty());
    }

    #[test]
    fn standard_pipeline_order() {
        let config = ProvisionConfig::default();
        let names: Vec<_> = Pipeline::standard(&config)
            .steps()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["upgrade", "install", "directories"]);
    }

    #[test]
    fn standard_pipeline_can_skip_upgrade() {
        let config = ProvisionConfig {
            skip_upgrade: true,
            ..Default::default()
        };
        let names: Vec<_> = Pipeline::standard(&config)
            .steps()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["install", "directories"]);
    }

    #[test]
    fn status_display() {
        assert_eq!(StepStatus::Unchanged.to_string(), "unchanged");
        assert!(StepStatus::Planned.is_success());
        assert!(!StepStatus::Failed.is_success());
    }
}

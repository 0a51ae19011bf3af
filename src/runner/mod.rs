//! Step orchestration.

pub mod pipeline;

pub use pipeline::{
    Pipeline, RunReport, Step, StepContext, StepOutcome, StepRecord, StepStatus,
};

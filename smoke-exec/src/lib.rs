#![forbid(unsafe_code)]

pub mod executor;
pub mod scenario;
pub mod target;

pub use crate::executor::{
    CancelToken, FailurePolicy, Runner, RunnerConfig, RunReport, RunStatus, StepOutcome, StepStatus,
};
pub use crate::scenario::{default_inputs, smoke_sequence, ScenarioOptions};
pub use crate::target::{PlaybackPath, Target};

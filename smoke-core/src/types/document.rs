use crate::types::{Info, StepDef};

/// A smoke-test sequence: an ordered list of HTTP steps executed strictly
/// in declaration order. Later steps may reference outputs captured by
/// earlier ones.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceDocument {
    /// Harness document version, e.g. "1.0".
    pub smoke: String,

    pub info: Info,

    pub steps: Vec<StepDef>,
}

impl SequenceDocument {
    pub fn step(&self, step_id: &str) -> Option<&StepDef> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }
}

use serde_json::json;

use super::http::HttpError;

/// Why a step did not succeed. Reported per step in the run report; never
/// propagated out of the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("failed to build request: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status} (expected {expected})")]
    UnexpectedStatus { status: u16, expected: String },
    #[error("response schema error: {0}")]
    Schema(String),
    #[error("dependency unmet: step '{step_id}' did not succeed")]
    DependencyUnmet { step_id: String },
    #[error("aborted: an earlier step failed and the run is fail-fast")]
    Aborted,
    #[error("run cancelled before this step started")]
    Cancelled,
}

impl StepError {
    pub fn kind(&self) -> &'static str {
        match self {
            StepError::Build(_) => "build",
            StepError::Network(_) => "network",
            StepError::UnexpectedStatus { .. } => "unexpected_status",
            StepError::Schema(_) => "schema",
            StepError::DependencyUnmet { .. } => "dependency_unmet",
            StepError::Aborted => "aborted",
            StepError::Cancelled => "cancelled",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            StepError::UnexpectedStatus { status, .. } => {
                json!({"type": self.kind(), "message": self.to_string(), "status": status})
            }
            _ => json!({"type": self.kind(), "message": self.to_string()}),
        }
    }
}

impl From<HttpError> for StepError {
    fn from(e: HttpError) -> Self {
        StepError::Network(e.to_string())
    }
}

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Completed,
    Aborted,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Completed => "COMPLETED",
            RunStatus::Aborted => "ABORTED",
        }
    }
}

/// Final state of one step, appended to the report in declaration order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StepOutcome {
    pub step_id: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonValue>,
    pub outputs: JsonValue,
}

impl StepOutcome {
    pub fn succeeded(step_id: &str, http_status: u16, outputs: JsonValue) -> Self {
        Self {
            step_id: step_id.to_string(),
            status: StepStatus::Succeeded,
            http_status: Some(http_status),
            error: None,
            outputs,
        }
    }

    pub fn failed(
        step_id: &str,
        http_status: Option<u16>,
        error: &super::failure::StepError,
    ) -> Self {
        Self {
            step_id: step_id.to_string(),
            status: StepStatus::Failed,
            http_status,
            error: Some(error.to_json()),
            outputs: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn skipped(step_id: &str, reason: &super::failure::StepError) -> Self {
        Self {
            step_id: step_id.to_string(),
            status: StepStatus::Skipped,
            http_status: None,
            error: Some(reason.to_json()),
            outputs: JsonValue::Object(serde_json::Map::new()),
        }
    }
}

/// Structured result of one run: every step's outcome in order plus the
/// aggregate verdict.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub status: RunStatus,
    /// True only when every step succeeded.
    pub ok: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    pub fn outcome(&self, step_id: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }
}

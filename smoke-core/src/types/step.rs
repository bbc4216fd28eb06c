use std::collections::BTreeMap;

use crate::types::StatusExpectation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    /// GET is the only verb in the target API surface that does not mutate
    /// server state; everything else creates sessions or changes playback.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

/// One step of a sequence. The path and body are templates: string values may
/// embed `{ $inputs.* }` and `{ $steps.<id>.outputs.* }` expressions which are
/// rendered against the run context just before the request is sent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepDef {
    #[serde(rename = "stepId")]
    pub step_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub method: Method,

    /// Request path template, joined onto the target base URL.
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,

    /// Expected response status. Absent means any 2xx.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<StatusExpectation>,

    /// Output name -> JSONPath applied to the response body on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<BTreeMap<String, String>>,

    #[serde(
        rename = "waitBeforeMs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub wait_before_ms: Option<u64>,

    #[serde(
        rename = "waitAfterMs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub wait_after_ms: Option<u64>,
}

use serde_json::Value as JsonValue;
use serde_json_path::JsonPath;

use smoke_core::types::{status_matches, StepDef};

use super::failure::StepError;
use super::http::HttpResponseParts;

pub fn parse_body_json(resp: &HttpResponseParts) -> Option<JsonValue> {
    let s = std::str::from_utf8(&resp.body).ok()?;
    serde_json::from_str(s).ok()
}

pub fn check_status(step: &StepDef, status: u16) -> Result<(), StepError> {
    if status_matches(step.expect.as_ref(), status) {
        return Ok(());
    }
    let expected = step
        .expect
        .as_ref()
        .map(|e| e.describe())
        .unwrap_or_else(|| "2xx".to_string());
    Err(StepError::UnexpectedStatus { status, expected })
}

/// Apply each declared capture path to the response body. A path that
/// matches nothing (missing `id`, empty `devices[]`) is a schema error on
/// this step, not a crash downstream.
pub fn capture_outputs(step: &StepDef, body: Option<&JsonValue>) -> Result<JsonValue, StepError> {
    let Some(capture) = &step.capture else {
        return Ok(JsonValue::Object(serde_json::Map::new()));
    };

    let body = body.ok_or_else(|| {
        StepError::Schema("response body is not JSON but captures are declared".to_string())
    })?;

    let mut out = serde_json::Map::new();
    for (name, path) in capture {
        let json_path = JsonPath::parse(path)
            .map_err(|e| StepError::Schema(format!("capture '{name}': invalid JSONPath: {e}")))?;
        let nodes = json_path.query(body).all();
        let node = nodes.first().ok_or_else(|| {
            StepError::Schema(format!("capture '{name}': no value at {path} in response body"))
        })?;
        out.insert(name.clone(), (*node).clone());
    }
    Ok(JsonValue::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smoke_core::types::{Method, StatusExpectation};
    use std::collections::BTreeMap;

    fn step_with_capture(paths: &[(&str, &str)]) -> StepDef {
        StepDef {
            step_id: "list_session_devices".to_string(),
            description: None,
            method: Method::Get,
            path: "/api/v3/sessions/x/devices".to_string(),
            body: None,
            expect: None,
            capture: Some(
                paths
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            wait_before_ms: None,
            wait_after_ms: None,
        }
    }

    #[test]
    fn captures_nested_field() {
        let step = step_with_capture(&[("device_id", "$.devices[0].id")]);
        let body = json!({"devices": [{"id": "dev-1", "is_active": true}]});
        let out = capture_outputs(&step, Some(&body)).unwrap();
        assert_eq!(out, json!({"device_id": "dev-1"}));
    }

    #[test]
    fn empty_device_list_is_a_schema_error() {
        let step = step_with_capture(&[("device_id", "$.devices[0].id")]);
        let body = json!({"devices": []});
        let err = capture_outputs(&step, Some(&body)).unwrap_err();
        assert!(matches!(err, StepError::Schema(_)));
    }

    #[test]
    fn non_json_body_with_captures_is_a_schema_error() {
        let step = step_with_capture(&[("id", "$.id")]);
        let err = capture_outputs(&step, None).unwrap_err();
        assert!(matches!(err, StepError::Schema(_)));
    }

    #[test]
    fn no_captures_yield_empty_outputs() {
        let mut step = step_with_capture(&[]);
        step.capture = None;
        let out = capture_outputs(&step, None).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn default_expectation_is_any_2xx() {
        let mut step = step_with_capture(&[]);
        step.capture = None;
        assert!(check_status(&step, 204).is_ok());
        let err = check_status(&step, 401).unwrap_err();
        assert_eq!(
            err,
            StepError::UnexpectedStatus {
                status: 401,
                expected: "2xx".to_string()
            }
        );
    }

    #[test]
    fn explicit_expectation_is_honored() {
        let mut step = step_with_capture(&[]);
        step.capture = None;
        step.expect = Some(StatusExpectation::Code(201));
        assert!(check_status(&step, 201).is_ok());
        assert!(check_status(&step, 200).is_err());
    }
}

use smoke_core::{parse_sequence_str, validate_sequence, DocumentFormat};

fn minimal_valid_yaml() -> &'static str {
    r#"
smoke: "1.0"
info:
  title: relaym smoke
  version: 0.0.1
steps:
  - stepId: get_me
    method: GET
    path: /api/v3/users/me
  - stepId: create_session
    method: POST
    path: /api/v3/sessions
    body:
      name: "{ $inputs.session_name }"
    capture:
      id: "$.id"
  - stepId: add_queue
    method: POST
    path: "/api/v3/sessions/{ $steps.create_session.outputs.id }/queue"
    body:
      uri: "{ $inputs.track_uri }"
"#
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_sequence_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    validate_sequence(&parsed.document).unwrap();
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_sequence_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
}

#[test]
fn parse_json_and_validate_ok() {
    let json = r#"
{
  "smoke": "1.0",
  "info": { "title": "relaym smoke", "version": "0.0.1" },
  "steps": [
    { "stepId": "get_me", "method": "GET", "path": "/api/v3/users/me", "expect": "2xx" }
  ]
}
"#;
    let parsed = parse_sequence_str(json, DocumentFormat::Json).unwrap();
    validate_sequence(&parsed.document).unwrap();
}

#[test]
fn parse_auto_detects_json() {
    let json = r#"{ "smoke": "1.0", "info": { "title": "t", "version": "1" }, "steps": [ { "stepId": "s1", "method": "GET", "path": "/api/v3/users/me" } ] }"#;
    let parsed = parse_sequence_str(json, DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
}

#[test]
fn forward_reference_is_a_violation() {
    let yaml = r#"
smoke: "1.0"
info:
  title: t
  version: "1"
steps:
  - stepId: add_queue
    method: POST
    path: "/api/v3/sessions/{ $steps.create_session.outputs.id }/queue"
  - stepId: create_session
    method: POST
    path: /api/v3/sessions
"#;
    let parsed = parse_sequence_str(yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_sequence(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.message.contains("create_session")));
}

#[test]
fn duplicate_step_ids_are_a_violation() {
    let yaml = r#"
smoke: "1.0"
info:
  title: t
  version: "1"
steps:
  - stepId: play
    method: PUT
    path: /api/v3/sessions/x/playback
  - stepId: play
    method: PUT
    path: /api/v3/sessions/x/playback
"#;
    let parsed = parse_sequence_str(yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_sequence(&parsed.document).unwrap_err();
    assert!(err.violations.iter().any(|v| v.message.contains("duplicate")));
}

#[test]
fn bad_capture_path_is_a_violation() {
    let yaml = r#"
smoke: "1.0"
info:
  title: t
  version: "1"
steps:
  - stepId: get_devices
    method: GET
    path: /api/v3/users/me/devices
    capture:
      first: "$.devices[?"
"#;
    let parsed = parse_sequence_str(yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_sequence(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.message.contains("invalid JSONPath")));
}

#[test]
fn unknown_status_class_is_a_violation() {
    let yaml = r#"
smoke: "1.0"
info:
  title: t
  version: "1"
steps:
  - stepId: get_me
    method: GET
    path: /api/v3/users/me
    expect: "9xx"
"#;
    let parsed = parse_sequence_str(yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_sequence(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.message.contains("unknown status class")));
}

#[test]
fn wrong_document_version_is_a_violation() {
    let yaml = r#"
smoke: "2.0"
info:
  title: t
  version: "1"
steps:
  - stepId: get_me
    method: GET
    path: /api/v3/users/me
"#;
    let parsed = parse_sequence_str(yaml, DocumentFormat::Yaml).unwrap();
    assert!(validate_sequence(&parsed.document).is_err());
}

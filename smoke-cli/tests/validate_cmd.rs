use assert_cmd::Command;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    std::io::Write::write_all(&mut f, contents.as_bytes()).expect("write");
    f
}

#[test]
fn validate_command_returns_0_for_valid_doc() {
    let doc = r#"
smoke: "1.0"
info:
  title: Example
  version: 0.0.1
steps:
  - stepId: get_me
    method: GET
    path: /api/v3/users/me
  - stepId: create_session
    method: POST
    path: /api/v3/sessions
    body:
      name: smoke
    capture:
      id: "$.id"
"#;
    let f = write_temp(doc);

    Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .success();
}

#[test]
fn validate_command_returns_2_for_forward_reference() {
    let doc = r#"
smoke: "1.0"
info:
  title: Example
  version: 0.0.1
steps:
  - stepId: add_queue
    method: POST
    path: "/api/v3/sessions/{ $steps.create_session.outputs.id }/queue"
  - stepId: create_session
    method: POST
    path: /api/v3/sessions
"#;
    let f = write_temp(doc);

    Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .code(2); // VALIDATION_FAILED
}

#[test]
fn validate_command_returns_4_for_missing_file() {
    Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["validate", "/nonexistent/sequence.yaml"])
        .assert()
        .code(4); // RUNTIME_ERROR
}

#[test]
fn validate_command_emits_json_result() {
    let doc = r#"
smoke: "1.0"
info:
  title: Example
  version: 0.0.1
steps:
  - stepId: get_me
    method: GET
    path: /api/v3/users/me
"#;
    let f = write_temp(doc);

    let assert = Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args([
            "validate",
            f.path().to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["valid"], serde_json::json!(true));
}

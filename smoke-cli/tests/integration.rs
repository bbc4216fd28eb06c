use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn scenario_command_prints_a_runnable_document() {
    let assert = Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["scenario"])
        .assert()
        .success();

    let yaml = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(yaml.contains("create_session"));
    assert!(yaml.contains("/api/v3/sessions"));

    // The printed document round-trips through validate.
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("scenario.yaml");
    fs::write(&path, yaml).unwrap();
    Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn scenario_command_honors_playback_path_variant() {
    let assert = Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["scenario", "--playback-path", "state"])
        .assert()
        .success();

    let yaml = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(yaml.contains("/state"));
    assert!(!yaml.contains("/playback"));
}

#[test]
fn plan_command_shows_builtin_dependencies() {
    let assert = Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["plan", "--builtin"])
        .assert()
        .success();

    let text = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(text.contains("get_me"));
    assert!(text.contains("add_queue (after: create_session)"));
}

#[test]
fn plan_command_without_path_or_builtin_fails() {
    Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["plan"])
        .assert()
        .code(4); // RUNTIME_ERROR
}

#[test]
fn run_command_requires_target_flags() {
    Command::cargo_bin("relaym-smoke")
        .unwrap()
        .args(["run", "--builtin"])
        .assert()
        .failure();
}

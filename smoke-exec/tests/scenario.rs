use smoke_core::{plan_sequence, validate_sequence};
use smoke_exec::{smoke_sequence, PlaybackPath, ScenarioOptions};

#[test]
fn builtin_sequence_is_valid() {
    let doc = smoke_sequence(&ScenarioOptions::default());
    validate_sequence(&doc).unwrap();
}

#[test]
fn builtin_sequence_covers_the_observed_workflow() {
    let doc = smoke_sequence(&ScenarioOptions::default());
    let ids: Vec<&str> = doc.steps.iter().map(|s| s.step_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "get_me",
            "get_devices",
            "create_session",
            "add_queue",
            "list_session_devices",
            "set_device",
            "play",
            "pause",
            "replay",
        ]
    );
}

#[test]
fn playback_path_variant_switches_the_paths() {
    let playback = smoke_sequence(&ScenarioOptions {
        playback_path: PlaybackPath::Playback,
        ..ScenarioOptions::default()
    });
    let state = smoke_sequence(&ScenarioOptions {
        playback_path: PlaybackPath::State,
        ..ScenarioOptions::default()
    });

    assert!(playback.step("play").unwrap().path.ends_with("/playback"));
    assert!(state.step("play").unwrap().path.ends_with("/state"));
    // One variant per run; the other path never appears.
    assert!(state.steps.iter().all(|s| !s.path.ends_with("/playback")));
}

#[test]
fn playback_transitions_carry_settle_waits() {
    let doc = smoke_sequence(&ScenarioOptions::default());
    assert_eq!(doc.step("play").unwrap().wait_after_ms, Some(5000));
    assert_eq!(doc.step("pause").unwrap().wait_after_ms, Some(5000));
    assert_eq!(doc.step("get_me").unwrap().wait_after_ms, None);
}

#[test]
fn later_steps_depend_on_create_session() {
    let doc = smoke_sequence(&ScenarioOptions::default());
    let plan = plan_sequence(&doc);
    for step_id in ["add_queue", "list_session_devices", "set_device", "play", "pause", "replay"] {
        let planned = plan
            .steps
            .iter()
            .find(|p| p.step_id == step_id)
            .unwrap();
        assert!(
            planned.depends_on.contains("create_session"),
            "{step_id} should depend on create_session"
        );
    }
    // Device binding additionally needs the captured device id.
    let set_device = plan
        .steps
        .iter()
        .find(|p| p.step_id == "set_device")
        .unwrap();
    assert!(set_device.depends_on.contains("list_session_devices"));
}

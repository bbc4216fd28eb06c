//! The builtin smoke sequence, mirroring the manual end-to-end check that
//! used to be pasted into a browser console: fetch the logged-in user, list
//! devices, create a session, queue a track, bind a device, then exercise
//! play / pause / play with settle time in between.

use std::collections::BTreeMap;

use serde_json::{json, Value as JsonValue};

use smoke_core::types::{Info, Method, SequenceDocument, StepDef};

use crate::target::PlaybackPath;

pub const DEFAULT_TRACK_URI: &str = "spotify:track:5uQ0vKy2973Y9IUCd1wMEF";
pub const DEFAULT_SESSION_NAME: &str = "test";

/// How long to let the playback system settle after a state transition
/// before asserting the next one.
pub const DEFAULT_SETTLE_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    pub playback_path: PlaybackPath,
    pub settle_ms: u64,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            playback_path: PlaybackPath::default(),
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

/// Inputs the builtin sequence expects; override individual keys with
/// `--set` on the command line.
pub fn default_inputs() -> JsonValue {
    json!({
        "session_name": DEFAULT_SESSION_NAME,
        "track_uri": DEFAULT_TRACK_URI,
    })
}

pub fn smoke_sequence(opts: &ScenarioOptions) -> SequenceDocument {
    let playback = format!(
        "/api/v3/sessions/{{ $steps.create_session.outputs.id }}/{}",
        opts.playback_path.segment()
    );

    let steps = vec![
        step(
            "get_me",
            "fetch the logged-in user",
            Method::Get,
            "/api/v3/users/me",
        ),
        step(
            "get_devices",
            "list the user's playback devices",
            Method::Get,
            "/api/v3/users/me/devices",
        ),
        StepDef {
            capture: Some(captures(&[("id", "$.id")])),
            body: Some(json!({"name": "{ $inputs.session_name }"})),
            ..step(
                "create_session",
                "create a fresh session; its id scopes every later call",
                Method::Post,
                "/api/v3/sessions",
            )
        },
        StepDef {
            body: Some(json!({"uri": "{ $inputs.track_uri }"})),
            ..step(
                "add_queue",
                "enqueue the smoke-test track",
                Method::Post,
                "/api/v3/sessions/{ $steps.create_session.outputs.id }/queue",
            )
        },
        StepDef {
            capture: Some(captures(&[("device_id", "$.devices[0].id")])),
            ..step(
                "list_session_devices",
                "devices visible to the session; fails loudly when empty",
                Method::Get,
                "/api/v3/sessions/{ $steps.create_session.outputs.id }/devices",
            )
        },
        StepDef {
            body: Some(json!({"device_id": "$steps.list_session_devices.outputs.device_id"})),
            ..step(
                "set_device",
                "bind the first visible device to the session",
                Method::Put,
                "/api/v3/sessions/{ $steps.create_session.outputs.id }/devices",
            )
        },
        StepDef {
            body: Some(json!({"state": "PLAY"})),
            wait_after_ms: Some(opts.settle_ms),
            ..step("play", "start playback", Method::Put, &playback)
        },
        StepDef {
            body: Some(json!({"state": "PAUSE"})),
            wait_after_ms: Some(opts.settle_ms),
            ..step("pause", "pause playback", Method::Put, &playback)
        },
        StepDef {
            body: Some(json!({"state": "PLAY"})),
            ..step("replay", "resume playback after the pause", Method::Put, &playback)
        },
    ];

    SequenceDocument {
        smoke: "1.0".to_string(),
        info: Info {
            title: "relaym session-playback smoke".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some(
                "create a session, queue a track, bind a device, and drive playback".to_string(),
            ),
        },
        steps,
    }
}

fn step(id: &str, description: &str, method: Method, path: &str) -> StepDef {
    StepDef {
        step_id: id.to_string(),
        description: Some(description.to_string()),
        method,
        path: path.to_string(),
        body: None,
        expect: None,
        capture: None,
        wait_before_ms: None,
        wait_after_ms: None,
    }
}

fn captures(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

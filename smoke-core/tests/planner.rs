use smoke_core::{parse_sequence_str, plan_sequence, DocumentFormat};

fn sequence_yaml() -> &'static str {
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
  - stepId: list_session_devices
    method: GET
    path: "/api/v3/sessions/{ $steps.create_session.outputs.id }/devices"
    capture:
      device_id: "$.devices[0].id"
  - stepId: set_device
    method: PUT
    path: "/api/v3/sessions/{ $steps.create_session.outputs.id }/devices"
    body:
      device_id: "$steps.list_session_devices.outputs.device_id"
"#
}

#[test]
fn plan_preserves_declared_order() {
    let doc = parse_sequence_str(sequence_yaml(), DocumentFormat::Yaml)
        .unwrap()
        .document;
    let plan = plan_sequence(&doc);
    let ids: Vec<&str> = plan.steps.iter().map(|s| s.step_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "get_me",
            "create_session",
            "list_session_devices",
            "set_device"
        ]
    );
}

#[test]
fn plan_collects_path_and_body_dependencies() {
    let doc = parse_sequence_str(sequence_yaml(), DocumentFormat::Yaml)
        .unwrap()
        .document;
    let plan = plan_sequence(&doc);

    assert!(plan.steps[0].depends_on.is_empty());
    assert!(plan.steps[1].depends_on.is_empty());
    assert_eq!(
        plan.steps[2].depends_on.iter().collect::<Vec<_>>(),
        vec!["create_session"]
    );
    // set_device references create_session in its path and
    // list_session_devices in its body.
    assert_eq!(
        plan.steps[3].depends_on.iter().collect::<Vec<_>>(),
        vec!["create_session", "list_session_devices"]
    );
}

#[test]
fn inputs_references_are_not_dependencies() {
    let doc = parse_sequence_str(sequence_yaml(), DocumentFormat::Yaml)
        .unwrap()
        .document;
    let plan = plan_sequence(&doc);
    assert!(plan.steps[1].depends_on.is_empty());
}

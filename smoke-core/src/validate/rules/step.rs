use std::collections::HashSet;

use serde_json_path::JsonPath;

use crate::types::{StatusExpectation, StepDef};
use crate::validate::validator::{Validator, ID_RE};

use super::common::{
    collect_string_step_refs, collect_value_step_refs, validate_template_string,
    validate_value_exprs,
};

pub(crate) fn validate_step(
    v: &mut Validator,
    step: &StepDef,
    path: &str,
    earlier_ids: &HashSet<String>,
) {
    if !step.path.starts_with('/') {
        v.push(format!("{path}.path"), "must start with '/'");
    }
    validate_template_string(v, &format!("{path}.path"), &step.path);

    if let Some(body) = &step.body {
        validate_value_exprs(v, &format!("{path}.body"), body);
    }

    if let Some(expect) = &step.expect {
        validate_expectation(v, &format!("{path}.expect"), expect);
    }

    if let Some(capture) = &step.capture {
        for (name, json_path) in capture {
            let cap_path = format!("{path}.capture.{name}");
            if !ID_RE.is_match(name) {
                v.push(&cap_path, "capture name must match ^[A-Za-z0-9_-]+$");
            }
            if JsonPath::parse(json_path).is_err() {
                v.push(&cap_path, format!("invalid JSONPath: {json_path}"));
            }
        }
    }

    // Ordering invariant: a step may only substitute from steps that both
    // exist and are declared before it.
    let mut refs = Vec::new();
    collect_string_step_refs(&step.path, &mut refs);
    if let Some(body) = &step.body {
        collect_value_step_refs(body, &mut refs);
    }
    for referenced in refs {
        if !earlier_ids.contains(&referenced) {
            v.push(
                path,
                format!(
                    "references step '{referenced}' which is not declared earlier in the sequence"
                ),
            );
        }
    }
}

fn validate_expectation(v: &mut Validator, path: &str, expect: &StatusExpectation) {
    match expect {
        StatusExpectation::Code(c) => validate_code(v, path, *c),
        StatusExpectation::AnyOf(codes) => {
            if codes.is_empty() {
                v.push(path, "expected status list must not be empty");
            }
            for c in codes {
                validate_code(v, path, *c);
            }
        }
        StatusExpectation::Class(class) => {
            if crate::types::expect::class_range(class).is_none() {
                v.push(path, format!("unknown status class: {class}"));
            }
        }
    }
}

fn validate_code(v: &mut Validator, path: &str, code: u16) {
    if !(100..=599).contains(&code) {
        v.push(path, format!("status code out of range: {code}"));
    }
}

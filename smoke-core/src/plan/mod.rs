use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

use crate::expressions::{parse_runtime_expr, parse_template};
use crate::types::{SequenceDocument, StepDef};

/// Execution plan for a sequence: the declared step order plus, for each
/// step, the set of earlier steps whose outputs it substitutes. The runner
/// uses the dependency sets to decide which steps to skip once something
/// upstream has failed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SequencePlan {
    pub steps: Vec<PlannedStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlannedStep {
    pub step_id: String,
    pub depends_on: BTreeSet<String>,
}

pub fn plan_sequence(doc: &SequenceDocument) -> SequencePlan {
    let steps = doc
        .steps
        .iter()
        .map(|s| PlannedStep {
            step_id: s.step_id.clone(),
            depends_on: scan_step(s),
        })
        .collect();
    SequencePlan { steps }
}

fn scan_step(step: &StepDef) -> BTreeSet<String> {
    let mut deps = BTreeSet::new();
    scan_string(&step.path, &mut deps);
    if let Some(body) = &step.body {
        scan_value(body, &mut deps);
    }
    deps
}

fn scan_value(value: &JsonValue, deps: &mut BTreeSet<String>) {
    match value {
        JsonValue::String(s) => scan_string(s, deps),
        JsonValue::Array(arr) => {
            for v in arr {
                scan_value(v, deps);
            }
        }
        JsonValue::Object(map) => {
            for v in map.values() {
                scan_value(v, deps);
            }
        }
        _ => {}
    }
}

fn scan_string(s: &str, deps: &mut BTreeSet<String>) {
    let trimmed = s.trim();
    if trimmed.starts_with('$') {
        if let Ok(expr) = parse_runtime_expr(trimmed) {
            if let Some(id) = expr.referenced_step() {
                deps.insert(id.to_string());
            }
        }
        return;
    }
    if let Ok(t) = parse_template(s) {
        deps.extend(t.referenced_steps());
    }
}

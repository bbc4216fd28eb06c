use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// Mutable state of one run: the inputs supplied at start and the outputs
/// captured from each succeeded step. Owned exclusively by the runner for
/// the duration of the run and discarded afterwards.
///
/// Outputs are only ever recorded for steps that succeeded, so template
/// substitution can never observe a failed or not-yet-run step.
#[derive(Debug)]
pub struct RunContext {
    inputs: JsonValue,
    outputs: BTreeMap<String, JsonValue>,
}

impl RunContext {
    pub fn new(inputs: JsonValue) -> Self {
        Self {
            inputs,
            outputs: BTreeMap::new(),
        }
    }

    pub fn inputs(&self) -> &JsonValue {
        &self.inputs
    }

    pub fn record_outputs(&mut self, step_id: &str, outputs: JsonValue) {
        self.outputs.insert(step_id.to_string(), outputs);
    }

    pub fn step_outputs(&self, step_id: &str) -> Option<&JsonValue> {
        self.outputs.get(step_id)
    }
}

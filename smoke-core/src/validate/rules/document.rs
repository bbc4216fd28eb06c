use std::collections::HashSet;

use crate::types::SequenceDocument;
use crate::validate::validator::{Validator, ID_RE};

use super::step;

pub(crate) fn validate_document(v: &mut Validator, doc: &SequenceDocument) {
    v.validate_version("smoke", &doc.smoke);

    if doc.info.title.trim().is_empty() {
        v.push("info.title", "must not be empty");
    }
    if doc.info.version.trim().is_empty() {
        v.push("info.version", "must not be empty");
    }

    if doc.steps.is_empty() {
        v.push("steps", "sequence must contain at least one step");
    }

    let mut seen = HashSet::new();
    // Ids of steps declared before the one being validated; expressions may
    // only reference these.
    let mut earlier: HashSet<String> = HashSet::new();

    for (idx, s) in doc.steps.iter().enumerate() {
        let path = format!("steps[{idx}]");

        if !ID_RE.is_match(&s.step_id) {
            v.push(
                format!("{path}.stepId"),
                "must match ^[A-Za-z0-9_-]+$",
            );
        }
        if !seen.insert(s.step_id.clone()) {
            v.push(
                format!("{path}.stepId"),
                format!("duplicate stepId: {}", s.step_id),
            );
        }

        step::validate_step(v, s, &path, &earlier);

        earlier.insert(s.step_id.clone());
    }
}

use serde_json::Value as JsonValue;

use crate::expressions::{parse_runtime_expr, parse_template, validate_value_expressions, Template};
use crate::validate::validator::Validator;

pub(crate) fn validate_template_string(
    v: &mut Validator,
    path: &str,
    input: &str,
) -> Option<Template> {
    match parse_template(input) {
        Ok(t) => Some(t),
        Err(e) => {
            v.push(path, e.to_string());
            None
        }
    }
}

pub(crate) fn validate_value_exprs(v: &mut Validator, path: &str, value: &JsonValue) {
    if let Err(e) = validate_value_expressions(value) {
        v.push(path, e.to_string());
    }
}

/// Collect `$steps.*` references from a string that may be either a bare
/// `$expr` or a template with embedded `{ $expr }` segments.
pub(crate) fn collect_string_step_refs(s: &str, out: &mut Vec<String>) {
    let trimmed = s.trim();
    if trimmed.starts_with('$') {
        if let Ok(expr) = parse_runtime_expr(trimmed) {
            if let Some(id) = expr.referenced_step() {
                out.push(id.to_string());
            }
        }
        return;
    }
    if let Ok(t) = parse_template(s) {
        out.extend(t.referenced_steps());
    }
}

pub(crate) fn collect_value_step_refs(value: &JsonValue, out: &mut Vec<String>) {
    match value {
        JsonValue::String(s) => collect_string_step_refs(s, out),
        JsonValue::Array(arr) => {
            for item in arr {
                collect_value_step_refs(item, out);
            }
        }
        JsonValue::Object(map) => {
            for item in map.values() {
                collect_value_step_refs(item, out);
            }
        }
        _ => {}
    }
}

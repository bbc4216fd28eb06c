use serde_json::Value as JsonValue;

use smoke_core::expressions::{
    parse_runtime_expr, parse_template, NamePath, RuntimeExpr, Segment, TemplateError,
};

use super::context::RunContext;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("no recorded outputs for step '{step_id}'")]
    MissingStepOutput { step_id: String },
    #[error("step '{step_id}' captured no output named '{name}'")]
    MissingOutputField { step_id: String, name: String },
}

/// Render a JSON value, resolving embedded expressions against the run
/// context. A string that is exactly one bare `$expr` resolves to the
/// referenced JSON value; strings with embedded `{ $expr }` segments render
/// to concatenated strings.
pub fn eval_value(value: &JsonValue, ctx: &RunContext) -> Result<JsonValue, EvalError> {
    match value {
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => Ok(value.clone()),
        JsonValue::String(s) => eval_string(s, ctx),
        JsonValue::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for v in arr {
                out.push(eval_value(v, ctx)?);
            }
            Ok(JsonValue::Array(out))
        }
        JsonValue::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                out.insert(k.clone(), eval_value(v, ctx)?);
            }
            Ok(JsonValue::Object(out))
        }
    }
}

pub fn eval_string(s: &str, ctx: &RunContext) -> Result<JsonValue, EvalError> {
    let trimmed = s.trim();
    if trimmed.starts_with('$') {
        return eval_expr_str(trimmed, ctx);
    }

    let tpl = parse_template(s)?;
    if tpl.segments.len() == 1 {
        if let Segment::Literal(lit) = &tpl.segments[0] {
            return Ok(JsonValue::String(lit.clone()));
        }
    }

    let mut out = String::new();
    for seg in &tpl.segments {
        match seg {
            Segment::Literal(l) => out.push_str(l),
            Segment::Expr(e) => {
                let v = eval_expr_str(e, ctx)?;
                out.push_str(&value_to_string(&v));
            }
        }
    }
    Ok(JsonValue::String(out))
}

pub fn eval_expr_str(expr: &str, ctx: &RunContext) -> Result<JsonValue, EvalError> {
    let parsed = parse_runtime_expr(expr).map_err(TemplateError::InvalidRuntimeExpr)?;
    eval_expr(&parsed, ctx)
}

pub fn eval_expr(expr: &RuntimeExpr, ctx: &RunContext) -> Result<JsonValue, EvalError> {
    match expr {
        RuntimeExpr::Inputs(np) => {
            walk_path(ctx.inputs(), np).ok_or_else(|| EvalError::MissingInput(np.root.clone()))
        }
        RuntimeExpr::StepOutput { step_id, output } => {
            let outputs = ctx
                .step_outputs(step_id)
                .ok_or_else(|| EvalError::MissingStepOutput {
                    step_id: step_id.clone(),
                })?;
            walk_path(outputs, output).ok_or_else(|| EvalError::MissingOutputField {
                step_id: step_id.clone(),
                name: output.root.clone(),
            })
        }
    }
}

fn walk_path(value: &JsonValue, np: &NamePath) -> Option<JsonValue> {
    let mut cur = value.get(&np.root)?;
    for seg in &np.rest {
        cur = cur.get(seg)?;
    }
    Some(cur.clone())
}

pub fn value_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx_with_session() -> RunContext {
        let mut ctx = RunContext::new(json!({"session_name": "test", "track_uri": "spotify:track:abc"}));
        ctx.record_outputs("create_session", json!({"id": "sess-1"}));
        ctx
    }

    #[test]
    fn bare_expr_resolves_to_json_value() {
        let ctx = ctx_with_session();
        let v = eval_string("$steps.create_session.outputs.id", &ctx).unwrap();
        assert_eq!(v, json!("sess-1"));
    }

    #[test]
    fn embedded_expr_renders_into_string() {
        let ctx = ctx_with_session();
        let v = eval_string(
            "/api/v3/sessions/{ $steps.create_session.outputs.id }/queue",
            &ctx,
        )
        .unwrap();
        assert_eq!(v, json!("/api/v3/sessions/sess-1/queue"));
    }

    #[test]
    fn body_object_renders_recursively() {
        let ctx = ctx_with_session();
        let body = json!({"name": "{ $inputs.session_name }", "uri": "$inputs.track_uri"});
        let v = eval_value(&body, &ctx).unwrap();
        assert_eq!(v, json!({"name": "test", "uri": "spotify:track:abc"}));
    }

    #[test]
    fn missing_step_output_is_reported() {
        let ctx = RunContext::new(json!({}));
        let err = eval_string("$steps.create_session.outputs.id", &ctx).unwrap_err();
        assert_eq!(
            err,
            EvalError::MissingStepOutput {
                step_id: "create_session".to_string()
            }
        );
    }

    #[test]
    fn plain_json_braces_are_untouched() {
        let ctx = ctx_with_session();
        let v = eval_string(r#"{"state":"PLAY"}"#, &ctx).unwrap();
        assert_eq!(v, json!(r#"{"state":"PLAY"}"#));
    }
}

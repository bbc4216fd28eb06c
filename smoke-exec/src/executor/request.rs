use std::collections::BTreeMap;

use smoke_core::expressions::{parse_template, Segment};
use smoke_core::types::StepDef;

use crate::target::Target;

use super::context::RunContext;
use super::eval::{eval_expr_str, eval_value, value_to_string, EvalError};
use super::failure::StepError;
use super::http::HttpRequestParts;

pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Render a step's templates against the run context and assemble the
/// request parts, including the auth headers every call carries.
pub fn build_request(
    target: &Target,
    step: &StepDef,
    ctx: &RunContext,
) -> Result<HttpRequestParts, StepError> {
    let path = render_path(&step.path, ctx)?;

    let mut url = target.base_url.clone();
    url.set_path(&path);

    let body = match &step.body {
        Some(template) => {
            let rendered = eval_value(template, ctx).map_err(map_eval_error)?;
            serde_json::to_vec(&rendered)
                .map_err(|e| StepError::Build(format!("failed to serialize request body: {e}")))?
        }
        None => Vec::new(),
    };

    let mut headers = BTreeMap::new();
    headers.insert(CSRF_HEADER.to_string(), target.csrf_token.clone());
    headers.insert(
        "Cookie".to_string(),
        format!("session={}", target.session_cookie),
    );
    headers.insert("content-type".to_string(), "application/json".to_string());

    Ok(HttpRequestParts {
        method: step.method.as_str().to_string(),
        url,
        headers,
        body,
    })
}

/// Substituted path segments are URL-encoded; literal segments are trusted
/// as written in the document.
fn render_path(template: &str, ctx: &RunContext) -> Result<String, StepError> {
    let tpl = parse_template(template)
        .map_err(|e| StepError::Build(format!("invalid path template: {e}")))?;

    let mut path = String::new();
    for seg in &tpl.segments {
        match seg {
            Segment::Literal(l) => path.push_str(l),
            Segment::Expr(e) => {
                let v = eval_expr_str(e, ctx).map_err(map_eval_error)?;
                path.push_str(&urlencoding::encode(&value_to_string(&v)));
            }
        }
    }
    Ok(path)
}

fn map_eval_error(e: EvalError) -> StepError {
    match e {
        EvalError::MissingStepOutput { step_id } => StepError::DependencyUnmet { step_id },
        other => StepError::Build(other.to_string()),
    }
}

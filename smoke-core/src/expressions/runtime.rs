use std::sync::LazyLock;

use regex::Regex;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid regex"));

/// Runtime expression, resolved against the run context while a sequence
/// executes.
///
/// Two roots are supported:
/// - `$inputs.<name>[.<name>...]` — values supplied at run start
/// - `$steps.<stepId>.outputs.<name>[.<name>...]` — an output captured by an
///   earlier step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeExpr {
    Inputs(NamePath),
    StepOutput { step_id: String, output: NamePath },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePath {
    pub root: String,
    pub rest: Vec<String>,
}

impl RuntimeExpr {
    /// The step id this expression depends on, if any.
    pub fn referenced_step(&self) -> Option<&str> {
        match self {
            RuntimeExpr::StepOutput { step_id, .. } => Some(step_id),
            RuntimeExpr::Inputs(_) => None,
        }
    }
}

pub fn parse_runtime_expr(input: &str) -> Result<RuntimeExpr, RuntimeExprError> {
    let s = input.trim();
    if !s.starts_with('$') {
        return Err(RuntimeExprError::MissingDollarPrefix);
    }
    let head = &s[1..];

    if let Some(rest) = head.strip_prefix("inputs.") {
        return Ok(RuntimeExpr::Inputs(parse_name_path(rest)?));
    }

    if let Some(rest) = head.strip_prefix("steps.") {
        let mut parts = rest.splitn(3, '.');
        let step_id = parts.next().unwrap_or_default();
        if step_id.is_empty() {
            return Err(RuntimeExprError::EmptyName);
        }
        if !NAME_RE.is_match(step_id) {
            return Err(RuntimeExprError::InvalidName(step_id.to_string()));
        }
        if parts.next() != Some("outputs") {
            return Err(RuntimeExprError::MissingOutputsSegment(rest.to_string()));
        }
        let output = parts
            .next()
            .ok_or(RuntimeExprError::EmptyName)
            .and_then(parse_name_path)?;
        return Ok(RuntimeExpr::StepOutput {
            step_id: step_id.to_string(),
            output,
        });
    }

    Err(RuntimeExprError::UnknownExpression(head.to_string()))
}

fn parse_name_path(rest: &str) -> Result<NamePath, RuntimeExprError> {
    let mut segments = rest.split('.');
    let root = segments.next().unwrap_or_default();
    if root.is_empty() {
        return Err(RuntimeExprError::EmptyName);
    }
    if !NAME_RE.is_match(root) {
        return Err(RuntimeExprError::InvalidName(root.to_string()));
    }
    let mut tail = Vec::new();
    for seg in segments {
        if seg.is_empty() {
            return Err(RuntimeExprError::EmptyName);
        }
        if !NAME_RE.is_match(seg) {
            return Err(RuntimeExprError::InvalidName(seg.to_string()));
        }
        tail.push(seg.to_string());
    }
    Ok(NamePath {
        root: root.to_string(),
        rest: tail,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeExprError {
    #[error("runtime expression must start with '$'")]
    MissingDollarPrefix,
    #[error("empty name in runtime expression")]
    EmptyName,
    #[error("invalid name in runtime expression: {0}")]
    InvalidName(String),
    #[error("step reference must be $steps.<stepId>.outputs.<name>: {0}")]
    MissingOutputsSegment(String),
    #[error("unknown runtime expression: ${0}")]
    UnknownExpression(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inputs_expr() {
        let e = parse_runtime_expr("$inputs.session_name").unwrap();
        assert_eq!(
            e,
            RuntimeExpr::Inputs(NamePath {
                root: "session_name".to_string(),
                rest: vec![],
            })
        );
    }

    #[test]
    fn parses_step_output_expr() {
        let e = parse_runtime_expr("$steps.create_session.outputs.id").unwrap();
        assert_eq!(e.referenced_step(), Some("create_session"));
        match e {
            RuntimeExpr::StepOutput { output, .. } => assert_eq!(output.root, "id"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_step_expr_without_outputs_segment() {
        let err = parse_runtime_expr("$steps.create_session.id").unwrap_err();
        assert!(matches!(err, RuntimeExprError::MissingOutputsSegment(_)));
    }

    #[test]
    fn rejects_unknown_roots() {
        assert!(matches!(
            parse_runtime_expr("$response.body"),
            Err(RuntimeExprError::UnknownExpression(_))
        ));
        assert!(matches!(
            parse_runtime_expr("inputs.name"),
            Err(RuntimeExprError::MissingDollarPrefix)
        ));
    }
}

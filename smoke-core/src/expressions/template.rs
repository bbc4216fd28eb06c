use serde_json::Value as JsonValue;

use super::runtime::{parse_runtime_expr, RuntimeExprError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Step ids referenced by `$steps.*` expressions in this template.
    pub fn referenced_steps(&self) -> Vec<String> {
        let mut out = Vec::new();
        for seg in &self.segments {
            if let Segment::Expr(e) = seg {
                if let Ok(expr) = parse_runtime_expr(e) {
                    if let Some(id) = expr.referenced_step() {
                        out.push(id.to_string());
                    }
                }
            }
        }
        out
    }
}

pub fn parse_template(input: &str) -> Result<Template, TemplateError> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '{' {
            // A brace only opens an expression when the next non-space char
            // is '$'; anything else is literal text (request bodies contain
            // plain JSON braces).
            let mut lookahead = chars.clone();
            while let Some(ws) = lookahead.peek() {
                if ws.is_whitespace() {
                    lookahead.next();
                } else {
                    break;
                }
            }
            if !matches!(lookahead.peek(), Some('$')) {
                buf.push('{');
                continue;
            }

            let mut inner = String::new();
            let mut closed = false;
            for n in chars.by_ref() {
                if n == '}' {
                    closed = true;
                    break;
                }
                inner.push(n);
            }
            if !closed {
                return Err(TemplateError::UnclosedExpression);
            }

            let inner = inner.trim();
            parse_runtime_expr(inner).map_err(TemplateError::InvalidRuntimeExpr)?;
            if !buf.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut buf)));
            }
            segments.push(Segment::Expr(inner.to_string()));
        } else {
            buf.push(ch);
        }
    }

    if !buf.is_empty() {
        segments.push(Segment::Literal(buf));
    }

    Ok(Template { segments })
}

/// Walk a JSON value and check that every embedded expression parses.
pub fn validate_value_expressions(value: &JsonValue) -> Result<(), TemplateError> {
    match value {
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => Ok(()),
        JsonValue::String(s) => validate_string_expressions(s),
        JsonValue::Array(arr) => {
            for v in arr {
                validate_value_expressions(v)?;
            }
            Ok(())
        }
        JsonValue::Object(map) => {
            for v in map.values() {
                validate_value_expressions(v)?;
            }
            Ok(())
        }
    }
}

fn validate_string_expressions(s: &str) -> Result<(), TemplateError> {
    let trimmed = s.trim();
    if trimmed.starts_with('$') {
        parse_runtime_expr(trimmed).map_err(TemplateError::InvalidRuntimeExpr)?;
        return Ok(());
    }
    let _ = parse_template(s)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid runtime expression: {0}")]
    InvalidRuntimeExpr(#[from] RuntimeExprError),
    #[error("unclosed embedded expression (missing '}}')")]
    UnclosedExpression,
}

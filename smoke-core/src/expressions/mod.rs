mod runtime;
mod template;

pub use runtime::{parse_runtime_expr, NamePath, RuntimeExpr, RuntimeExprError};
pub use template::{parse_template, validate_value_expressions, Segment, Template, TemplateError};

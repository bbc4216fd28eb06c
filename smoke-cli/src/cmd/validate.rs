use std::path::Path;

use serde::Serialize;
use smoke_core::validate_sequence;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match super::load_sequence(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    match validate_sequence(&parsed.document) {
        Ok(()) => {
            let result = ValidateResult {
                valid: true,
                format: format!("{:?}", parsed.format),
                errors: vec![],
            };
            if output.format == OutputFormat::Text && !output.quiet {
                println!("ok: valid smoke sequence ({:?})", parsed.format);
            } else {
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(err) => {
            let errors: Vec<String> = err
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.path, v.message))
                .collect();
            let result = ValidateResult {
                valid: false,
                format: format!("{:?}", parsed.format),
                errors: errors.clone(),
            };
            if output.format == OutputFormat::Text && !output.quiet {
                eprintln!("error: validation failed");
                for e in &errors {
                    eprintln!("- {e}");
                }
            } else {
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::VALIDATION_FAILED
        }
    }
}

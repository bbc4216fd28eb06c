pub mod plan;
pub mod run;
pub mod scenario;
pub mod validate;

use std::path::Path;

use smoke_core::{parse_sequence_str, DocumentFormat, ParsedSequence};

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// Read and parse a sequence document, reporting errors in CLI terms.
pub(crate) fn load_sequence(path: &Path, output: &OutputArgs) -> Result<ParsedSequence, i32> {
    let content = match std::fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", path.display()),
            );
            return Err(exit_codes::RUNTIME_ERROR);
        }
    };

    parse_sequence_str(&content, DocumentFormat::Auto).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::VALIDATION_FAILED
    })
}

use std::path::Path;

use smoke_core::{plan_sequence, validate_sequence};
use smoke_exec::{smoke_sequence, ScenarioOptions};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{OutputArgs, ScenarioArgs};

pub async fn plan_cmd(
    path: Option<&Path>,
    builtin: bool,
    scenario: ScenarioArgs,
    output: OutputArgs,
) -> i32 {
    let document = match (path, builtin) {
        (Some(p), _) => match super::load_sequence(p, &output) {
            Ok(parsed) => parsed.document,
            Err(code) => return code,
        },
        (None, true) => smoke_sequence(&ScenarioOptions {
            playback_path: scenario.playback_path.into(),
            settle_ms: scenario.settle_ms,
        }),
        (None, false) => {
            print_error(output.format, output.quiet, "provide a path or --builtin");
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if let Err(err) = validate_sequence(&document) {
        print_error(
            output.format,
            output.quiet,
            &format!("sequence failed validation ({} violations)", err.violations.len()),
        );
        return exit_codes::VALIDATION_FAILED;
    }

    let plan = plan_sequence(&document);

    if output.format == OutputFormat::Text && !output.quiet {
        for (i, step) in plan.steps.iter().enumerate() {
            if step.depends_on.is_empty() {
                println!("{}. {}", i + 1, step.step_id);
            } else {
                let deps: Vec<&str> = step.depends_on.iter().map(String::as_str).collect();
                println!("{}. {} (after: {})", i + 1, step.step_id, deps.join(", "));
            }
        }
    } else {
        print_result(output.format, output.quiet, &plan);
    }
    exit_codes::SUCCESS
}

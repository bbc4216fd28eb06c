use smoke_exec::{smoke_sequence, ScenarioOptions};

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{OutputArgs, ScenarioArgs};

/// Print the builtin sequence so it can be saved, edited, and fed back to
/// `run` / `validate`.
pub async fn scenario_cmd(scenario: ScenarioArgs, output: OutputArgs) -> i32 {
    let document = smoke_sequence(&ScenarioOptions {
        playback_path: scenario.playback_path.into(),
        settle_ms: scenario.settle_ms,
    });

    // Default to YAML here; it is the natural authoring format.
    let format = match output.format {
        OutputFormat::Text => OutputFormat::Yaml,
        other => other,
    };
    print_result(format, output.quiet, &document);
    exit_codes::SUCCESS
}

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value as JsonValue;
use smoke_core::{plan_sequence, validate_sequence};
use smoke_exec::executor::{
    CancelToken, EventSink, FailurePolicy, NullEventSink, ReqwestHttpClient, Runner, RunnerConfig,
    RunReport, StdoutEventSink, StepStatus,
};
use smoke_exec::{default_inputs, smoke_sequence, ScenarioOptions, Target};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{OutputArgs, RunArgs, ScenarioArgs, TargetArgs};

pub async fn run_cmd(
    path: Option<&Path>,
    builtin: bool,
    target: TargetArgs,
    run: RunArgs,
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
        if !output.quiet {
            eprintln!("error: sequence failed validation");
            for v in &err.violations {
                eprintln!("- {}: {}", v.path, v.message);
            }
        }
        return exit_codes::VALIDATION_FAILED;
    }
    let plan = plan_sequence(&document);

    let mut inputs = if builtin { default_inputs() } else { JsonValue::Object(Default::default()) };
    if let Some(inputs_path) = &run.inputs {
        match load_inputs_file(inputs_path) {
            Ok(from_file) => merge_inputs(&mut inputs, from_file),
            Err(e) => {
                print_error(output.format, output.quiet, &e);
                return exit_codes::RUNTIME_ERROR;
            }
        }
    }
    if let Err(e) = merge_set_inputs(&mut inputs, &run.set_inputs) {
        print_error(output.format, output.quiet, &e);
        return exit_codes::RUNTIME_ERROR;
    }

    let base_url = match url::Url::parse(&target.base_url) {
        Ok(u) => u,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("invalid base url {}: {e}", target.base_url),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let target = Target::new(base_url, target.csrf_token, target.cookie);

    let http = match ReqwestHttpClient::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to create http client: {e}"),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let events: Arc<dyn EventSink> = if run.events && !output.quiet {
        Arc::new(StdoutEventSink)
    } else {
        Arc::new(NullEventSink)
    };

    let config = RunnerConfig {
        failure_policy: if run.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::FailFast
        },
        step_delay: run.step_delay_ms.map(Duration::from_millis),
        timeout: Duration::from_millis(run.timeout),
        ..RunnerConfig::default()
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let runner = Runner::new(http, events, config);
    let report = runner.run(&document, &plan, &target, inputs, &cancel).await;

    if output.format == OutputFormat::Text && !output.quiet {
        print_text_report(&report);
    } else {
        print_result(output.format, output.quiet, &report);
    }

    if report.ok {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

fn print_text_report(report: &RunReport) {
    for step in &report.steps {
        let status = match step.status {
            StepStatus::Succeeded => "ok  ",
            StepStatus::Failed => "FAIL",
            StepStatus::Skipped => "skip",
        };
        let http = step
            .http_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        match &step.error {
            Some(err) => {
                let msg = err["message"].as_str().unwrap_or_default();
                println!("{status}  {:<22} {:>4}  {msg}", step.step_id, http);
            }
            None => println!("{status}  {:<22} {:>4}", step.step_id, http),
        }
    }
    let succeeded = report
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Succeeded)
        .count();
    println!(
        "run {} {} ({succeeded}/{} steps succeeded)",
        report.run_id,
        report.status.as_str(),
        report.steps.len()
    );
}

fn load_inputs_file(path: &Path) -> Result<JsonValue, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid inputs JSON: {e}"))
}

fn merge_inputs(into: &mut JsonValue, from: JsonValue) {
    if let (JsonValue::Object(into), JsonValue::Object(from)) = (into, from) {
        for (k, v) in from {
            into.insert(k, v);
        }
    }
}

fn merge_set_inputs(inputs: &mut JsonValue, set_inputs: &[String]) -> Result<(), String> {
    for pair in set_inputs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("--set expects KEY=VALUE, got: {pair}"))?;
        if let JsonValue::Object(map) = inputs {
            map.insert(key.to_string(), JsonValue::String(value.to_string()));
        }
    }
    Ok(())
}

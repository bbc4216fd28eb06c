pub mod context;
pub mod eval;
pub mod events;
pub mod failure;
pub mod http;
pub mod report;
pub mod request;
pub mod response;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use smoke_core::plan::SequencePlan;
use smoke_core::types::{SequenceDocument, StepDef};

pub use context::RunContext;
pub use events::{CompositeEventSink, Event, EventSink, NullEventSink, StdoutEventSink};
pub use failure::StepError;
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use report::{RunReport, RunStatus, StepOutcome, StepStatus};

use crate::target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the run on the first failed step; the rest are skipped.
    #[default]
    FailFast,
    /// Keep going; steps depending on a non-succeeded step are skipped.
    Continue,
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub failure_policy: FailurePolicy,
    /// Extra pause inserted before every step after the first.
    pub step_delay: Option<Duration>,
    pub timeout: Duration,
    pub max_response_bytes: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            step_delay: None,
            timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Cooperative cancellation, observed between steps only; an in-flight
/// request is always allowed to finish so its side effect is accounted for.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Runner {
    http: Arc<dyn HttpClient>,
    events: Arc<dyn EventSink>,
    config: RunnerConfig,
}

impl Runner {
    pub fn new(http: Arc<dyn HttpClient>, events: Arc<dyn EventSink>, config: RunnerConfig) -> Self {
        Self {
            http,
            events,
            config,
        }
    }

    /// Execute the sequence strictly in declaration order. Each step is
    /// finalized (succeeded, failed, or skipped) before the next one is
    /// considered, and no step is ever attempted twice.
    pub async fn run(
        &self,
        doc: &SequenceDocument,
        plan: &SequencePlan,
        target: &Target,
        inputs: JsonValue,
        cancel: &CancelToken,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        self.events
            .emit(Event::RunStarted {
                run_id,
                sequence_title: doc.info.title.clone(),
            })
            .await;

        let mut ctx = RunContext::new(inputs);
        let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(doc.steps.len());
        let mut aborted = false;
        let mut cancelled = false;
        let mut any_executed = false;

        for (idx, step) in doc.steps.iter().enumerate() {
            if !cancelled && cancel.is_cancelled() {
                cancelled = true;
            }

            if aborted || cancelled {
                let reason = if cancelled {
                    StepError::Cancelled
                } else {
                    StepError::Aborted
                };
                outcomes.push(self.skip_step(run_id, &step.step_id, reason).await);
                continue;
            }

            // A step may only substitute from steps that already succeeded.
            let unmet = plan
                .steps
                .get(idx)
                .and_then(|p| {
                    p.depends_on
                        .iter()
                        .find(|dep| !step_succeeded(&outcomes, dep.as_str()))
                })
                .cloned();
            if let Some(dep) = unmet {
                outcomes.push(
                    self.skip_step(run_id, &step.step_id, StepError::DependencyUnmet { step_id: dep })
                        .await,
                );
                continue;
            }

            if any_executed {
                if let Some(delay) = self.config.step_delay {
                    tokio::time::sleep(delay).await;
                }
            }
            if let Some(ms) = step.wait_before_ms {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }

            any_executed = true;
            self.events
                .emit(Event::StepStarted {
                    run_id,
                    step_id: step.step_id.clone(),
                })
                .await;

            match self.execute_step(step, target, &ctx).await {
                Ok((http_status, outputs)) => {
                    ctx.record_outputs(&step.step_id, outputs.clone());
                    self.events
                        .emit(Event::StepSucceeded {
                            run_id,
                            step_id: step.step_id.clone(),
                            http_status,
                        })
                        .await;
                    outcomes.push(StepOutcome::succeeded(&step.step_id, http_status, outputs));

                    if let Some(ms) = step.wait_after_ms {
                        tokio::time::sleep(Duration::from_millis(ms)).await;
                    }
                }
                Err((http_status, error)) => {
                    self.events
                        .emit(Event::StepFailed {
                            run_id,
                            step_id: step.step_id.clone(),
                            http_status,
                        })
                        .await;
                    outcomes.push(StepOutcome::failed(&step.step_id, http_status, &error));

                    if self.config.failure_policy == FailurePolicy::FailFast {
                        aborted = true;
                    }
                }
            }
        }

        let status = if aborted || cancelled {
            RunStatus::Aborted
        } else {
            RunStatus::Completed
        };
        let ok = outcomes.iter().all(|o| o.status == StepStatus::Succeeded);

        self.events
            .emit(Event::RunFinished { run_id, status, ok })
            .await;

        RunReport {
            run_id,
            status,
            ok,
            started_at,
            finished_at: Utc::now(),
            steps: outcomes,
        }
    }

    /// One attempt, exactly: the target calls mutate playback state, so a
    /// retried step could double-create sessions or queue entries.
    async fn execute_step(
        &self,
        step: &StepDef,
        target: &Target,
        ctx: &RunContext,
    ) -> Result<(u16, JsonValue), (Option<u16>, StepError)> {
        let parts = request::build_request(target, step, ctx).map_err(|e| (None, e))?;

        let resp = self
            .http
            .send(parts, self.config.timeout, self.config.max_response_bytes)
            .await
            .map_err(|e| (None, StepError::from(e)))?;

        let status = resp.status;
        response::check_status(step, status).map_err(|e| (Some(status), e))?;

        let body_json = response::parse_body_json(&resp);
        let outputs =
            response::capture_outputs(step, body_json.as_ref()).map_err(|e| (Some(status), e))?;

        Ok((status, outputs))
    }

    async fn skip_step(&self, run_id: Uuid, step_id: &str, reason: StepError) -> StepOutcome {
        self.events
            .emit(Event::StepSkipped {
                run_id,
                step_id: step_id.to_string(),
                reason: reason.to_string(),
            })
            .await;
        StepOutcome::skipped(step_id, &reason)
    }
}

fn step_succeeded(outcomes: &[StepOutcome], step_id: &str) -> bool {
    outcomes
        .iter()
        .any(|o| o.step_id == step_id && o.status == StepStatus::Succeeded)
}

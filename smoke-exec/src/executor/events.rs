use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use super::report::RunStatus;

#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        sequence_title: String,
    },
    RunFinished {
        run_id: Uuid,
        status: RunStatus,
        ok: bool,
    },
    StepStarted {
        run_id: Uuid,
        step_id: String,
    },
    StepSucceeded {
        run_id: Uuid,
        step_id: String,
        http_status: u16,
    },
    StepFailed {
        run_id: Uuid,
        step_id: String,
        http_status: Option<u16>,
    },
    StepSkipped {
        run_id: Uuid,
        step_id: String,
        reason: String,
    },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct NullEventSink;

#[async_trait]
impl EventSink for NullEventSink {
    async fn emit(&self, _event: Event) {}
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Emits each event as one JSON line, for watching a run from a terminal or
/// piping into other tooling.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        let json = match event {
            Event::RunStarted {
                run_id,
                sequence_title,
            } => {
                json!({ "type": "run.started", "run_id": run_id.to_string(), "sequence": sequence_title })
            }
            Event::RunFinished { run_id, status, ok } => {
                json!({ "type": "run.finished", "run_id": run_id.to_string(), "status": status.as_str(), "ok": ok })
            }
            Event::StepStarted { run_id, step_id } => {
                json!({ "type": "step.started", "run_id": run_id.to_string(), "step_id": step_id })
            }
            Event::StepSucceeded {
                run_id,
                step_id,
                http_status,
            } => {
                json!({ "type": "step.succeeded", "run_id": run_id.to_string(), "step_id": step_id, "http_status": http_status })
            }
            Event::StepFailed {
                run_id,
                step_id,
                http_status,
            } => {
                json!({ "type": "step.failed", "run_id": run_id.to_string(), "step_id": step_id, "http_status": http_status })
            }
            Event::StepSkipped {
                run_id,
                step_id,
                reason,
            } => {
                json!({ "type": "step.skipped", "run_id": run_id.to_string(), "step_id": step_id, "reason": reason })
            }
        };
        println!("{json}");
    }
}

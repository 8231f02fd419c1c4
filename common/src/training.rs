//! Training workflow logic: request building, the precondition gate, and a
//! reducer over polled status payloads.
//!
//! The poll loop itself lives in the frontend (it needs a browser timer);
//! everything that decides *what happens* on each status lives here so the
//! terminal-state handling can be driven by plain test sequences instead of
//! real timers.

use serde::{Deserialize, Serialize};

use crate::model::records::ModelInfo;
use crate::model::template::Template;

/// Sent to the backend with every training request.
pub const MIN_TEMPLATES: u32 = 10;
/// Below this count the user is asked to confirm before training proceeds.
pub const CONFIRM_THRESHOLD: usize = 3;
/// Fixed client-driven poll interval against the status endpoint.
pub const POLL_INTERVAL_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    pub epochs: u32,
    pub batch_size: u32,
    pub generate_synthetic: bool,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 16,
            generate_synthetic: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainRequest {
    pub templates: Vec<Template>,
    pub config: TrainConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainConfig {
    pub epochs: u32,
    pub batch_size: u32,
    pub generate_synthetic: bool,
    pub min_templates: u32,
}

/// Precondition on the stored template count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingGate {
    /// No templates at all: warn and issue no request.
    Blocked,
    /// Fewer than the recommended count: ask, but let the user continue.
    NeedsConfirmation(usize),
    Ready,
}

pub fn check_template_count(count: usize) -> TrainingGate {
    if count == 0 {
        TrainingGate::Blocked
    } else if count < CONFIRM_THRESHOLD {
        TrainingGate::NeedsConfirmation(count)
    } else {
        TrainingGate::Ready
    }
}

pub fn build_training_request(templates: Vec<Template>, params: TrainingParams) -> TrainRequest {
    TrainRequest {
        templates,
        config: TrainConfig {
            epochs: params.epochs,
            batch_size: params.batch_size,
            generate_synthetic: params.generate_synthetic,
            min_templates: MIN_TEMPLATES,
        },
    }
}

/// Initial response of `POST /train`: either a synchronous `result` or a
/// `task_id` to poll.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub result: Option<TrainResult>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainResult {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub epochs: u32,
    #[serde(default)]
    pub training_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainState {
    Running,
    Complete,
    Error,
    #[serde(other)]
    Other,
}

/// One payload of `GET /train/status/{task_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainStatus {
    pub status: TrainState,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub log: Option<Vec<String>>,
    #[serde(default)]
    pub result: Option<TrainResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TrainStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, TrainState::Complete | TrainState::Error)
    }
}

/// What the workflow should do after one observed status.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Keep polling; update the progress indicator.
    Progress { percent: f64, message: Option<String> },
    /// Terminal success; persist this model info (emitted at most once).
    Completed(ModelInfo),
    /// Terminal failure; stop polling, leave the previous model info alone.
    Failed(String),
    /// Status arrived after a terminal event (stale timer); drop it.
    Ignored,
}

/// Folds successive poll statuses into workflow events. After a terminal
/// event every further status is ignored, so completion side effects (the
/// model-info write) happen exactly once per run.
pub struct TrainingRun {
    template_count: usize,
    finished: bool,
}

impl TrainingRun {
    pub fn new(template_count: usize) -> Self {
        Self {
            template_count,
            finished: false,
        }
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn apply(&mut self, status: &TrainStatus, trained_at: &str) -> RunEvent {
        if self.finished {
            return RunEvent::Ignored;
        }
        match status.status {
            TrainState::Running | TrainState::Other => RunEvent::Progress {
                percent: status.progress.unwrap_or(0.0),
                message: status.message.clone(),
            },
            TrainState::Complete => {
                self.finished = true;
                RunEvent::Completed(self.model_info(status.result.as_ref(), trained_at))
            }
            TrainState::Error => {
                self.finished = true;
                RunEvent::Failed(
                    status
                        .error
                        .clone()
                        .or_else(|| status.message.clone())
                        .unwrap_or_else(|| "Training failed".to_string()),
                )
            }
        }
    }

    /// Builds the persisted cache entry from a terminal result; also used for
    /// the synchronous completion mode of `POST /train`.
    pub fn model_info(&self, result: Option<&TrainResult>, trained_at: &str) -> ModelInfo {
        let result = result.cloned().unwrap_or(TrainResult {
            accuracy: 0.0,
            epochs: 0,
            training_time: 0.0,
        });
        ModelInfo {
            trained_at: trained_at.to_string(),
            accuracy: result.accuracy,
            epochs: result.epochs,
            template_count: self.template_count,
            training_time: result.training_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_templates_block_training_before_any_request() {
        assert_eq!(check_template_count(0), TrainingGate::Blocked);
        assert_eq!(check_template_count(2), TrainingGate::NeedsConfirmation(2));
        assert_eq!(check_template_count(3), TrainingGate::Ready);
    }

    #[test]
    fn request_carries_min_templates_constant() {
        let request = build_training_request(vec![], TrainingParams::default());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["config"]["min_templates"], 10);
        assert_eq!(json["config"]["epochs"], 50);
        assert_eq!(json["config"]["generate_synthetic"], true);
    }

    fn status(json: serde_json::Value) -> TrainStatus {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn poll_sequence_completes_exactly_once() {
        let mut run = TrainingRun::new(4);

        let event = run.apply(&status(serde_json::json!({"status": "running", "progress": 50})), "t");
        assert_eq!(
            event,
            RunEvent::Progress { percent: 50.0, message: None }
        );

        let event = run.apply(&status(serde_json::json!({"status": "running", "progress": 80})), "t");
        assert!(matches!(event, RunEvent::Progress { percent, .. } if percent == 80.0));

        let complete = status(serde_json::json!({
            "status": "complete",
            "result": {"accuracy": 0.95, "epochs": 20, "training_time": 12.5}
        }));
        assert!(complete.is_terminal());
        let event = run.apply(&complete, "2026-08-23T10:00:00Z");
        let RunEvent::Completed(info) = event else {
            panic!("expected completion");
        };
        assert_eq!(info.accuracy, 0.95);
        assert_eq!(info.epochs, 20);
        assert_eq!(info.template_count, 4);

        // A stale timer delivering another status must not complete again.
        assert_eq!(run.apply(&complete, "t"), RunEvent::Ignored);
        assert!(run.finished());
    }

    #[test]
    fn error_status_surfaces_the_most_specific_message() {
        let mut run = TrainingRun::new(1);
        let event = run.apply(
            &status(serde_json::json!({"status": "error", "message": "m", "error": "boom"})),
            "t",
        );
        assert_eq!(event, RunEvent::Failed("boom".to_string()));
        assert_eq!(
            TrainingRun::new(1).apply(&status(serde_json::json!({"status": "error"})), "t"),
            RunEvent::Failed("Training failed".to_string())
        );
    }
}

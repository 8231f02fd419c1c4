//! State for the training workflow.

use common::api::MlTemplateSummary;
use common::model::records::ModelInfo;
use common::training::{TrainingParams, TrainingRun};

pub struct TrainingComponent {
    pub params: TrainingParams,
    pub running: bool,
    pub progress: f64,
    pub message: Option<String>,
    pub log: Vec<String>,
    pub error: Option<String>,
    pub model_info: Option<ModelInfo>,
    /// Templates the trained model reports knowing, fetched best-effort.
    pub known_templates: Vec<MlTemplateSummary>,
    /// Reducer of the active run; `None` when idle.
    pub run: Option<TrainingRun>,
    /// Poll generation counter. Scheduled timers carry the value they were
    /// created under; a mismatch marks them stale and they are dropped, which
    /// is the only cancellation the workflow needs.
    pub poll_epoch: u32,
}

impl TrainingComponent {
    pub fn new() -> Self {
        Self {
            params: TrainingParams::default(),
            running: false,
            progress: 0.0,
            message: None,
            log: Vec::new(),
            error: None,
            model_info: None,
            known_templates: Vec::new(),
            run: None,
            poll_epoch: 0,
        }
    }
}

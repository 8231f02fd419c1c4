use serde::{Deserialize, Serialize};

/// One entry of the append-only generation log. Read back newest-first and
/// capped to the five most recent for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentGeneration {
    pub template_id: String,
    pub template_name: String,
    pub data: serde_json::Value,
    pub timestamp: String,
}

/// Local cache of the last training result, overwritten wholesale on each
/// successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub trained_at: String,
    pub accuracy: f64,
    pub epochs: u32,
    pub template_count: usize,
    pub training_time: f64,
}

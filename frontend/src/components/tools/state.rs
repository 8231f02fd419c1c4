use common::model::template::Template;
use yew::prelude::*;

/// Inline error panel contents. `available_templates` and `top_scores` come
/// from structured extraction failures and stay empty otherwise.
pub struct ToolError {
    pub message: String,
    pub available_templates: Vec<String>,
    pub top_scores: Vec<(String, f64)>,
}

impl ToolError {
    pub fn message_only(message: String) -> Self {
        Self {
            message,
            available_templates: Vec::new(),
            top_scores: Vec::new(),
        }
    }
}

pub enum Outcome {
    /// Detection result with all scores sorted by descending confidence.
    Detection {
        template_name: String,
        confidence: f64,
        scores: Vec<(String, f64)>,
    },
    /// Extracted field values, kept for the smart-generate follow-up.
    Extraction {
        template_id: String,
        data: serde_json::Map<String, serde_json::Value>,
    },
    /// A generated or imported template, staged until the user explicitly
    /// saves it into the store.
    Staged(Template),
}

pub struct UploadTool {
    pub busy: bool,
    pub smart_busy: bool,
    pub drag_over: bool,
    pub error: Option<ToolError>,
    pub outcome: Option<Outcome>,
    /// Auxiliary template name for the auto-generate tool.
    pub template_name: String,
    pub file_input_ref: NodeRef,
}

impl UploadTool {
    pub fn new() -> Self {
        Self {
            busy: false,
            smart_busy: false,
            drag_over: false,
            error: None,
            outcome: None,
            template_name: String::new(),
            file_input_ref: Default::default(),
        }
    }
}

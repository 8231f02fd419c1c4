//! Wire types for the backend endpoints and the shared error taxonomy.
//!
//! Every endpoint returns JSON except the two generation endpoints, which
//! return a binary PDF. Failure bodies vary between `detail`, `message` and
//! `error` keys depending on the endpoint; `backend_message` picks the most
//! specific one available.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::field::Field;
use crate::model::template::{Template, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport-level failure: the backend is unreachable.
    #[error("Could not reach the backend — is the backend running? ({0})")]
    Network(String),
    /// A 4xx/5xx with a JSON body; `message` is the most specific text the
    /// body offered and `body` keeps the full payload for structured
    /// rendering (available templates, detection scores).
    #[error("{message}")]
    Backend {
        status: u16,
        message: String,
        body: serde_json::Value,
    },
    /// Anything that could not be decoded into an expected shape.
    #[error("Unexpected response from the backend: {0}")]
    Unexpected(String),
}

/// Most specific human-readable message in a structured error body:
/// `detail`, then `message`, then `error`.
pub fn backend_message(body: &serde_json::Value) -> Option<String> {
    for key in ["detail", "message", "error"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Detection scores sorted by descending confidence; ties break on the
/// template name so rendering is deterministic.
pub fn top_scores(all_scores: &HashMap<String, f64>, limit: usize) -> Vec<(String, f64)> {
    let mut scores: Vec<(String, f64)> = all_scores
        .iter()
        .map(|(name, score)| (name.clone(), *score))
        .collect();
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
    scores.truncate(limit);
    scores
}

// --- POST /ml/detect-template -----------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub all_scores: Option<HashMap<String, f64>>,
}

// --- POST /ml/extract-data ---------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub available_templates: Option<Vec<String>>,
    #[serde(default)]
    pub details: Option<ExtractDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractDetails {
    #[serde(default)]
    pub all_scores: Option<HashMap<String, f64>>,
}

// --- POST /ml/auto-generate-template -------------------------------------------

/// Template shape the ML endpoints speak: page geometry as `width`/`height`
/// instead of `pageWidth`/`pageHeight`.
#[derive(Debug, Clone, Deserialize)]
pub struct MlTemplate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl MlTemplate {
    pub fn into_template(self) -> Template {
        Template {
            id: self.id,
            name: self.name,
            page_width: self.width.unwrap_or(DEFAULT_PAGE_WIDTH),
            page_height: self.height.unwrap_or(DEFAULT_PAGE_HEIGHT),
            fields: self.fields,
            created_at: None,
            pdf_file_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutoGenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub template: Option<MlTemplate>,
}

/// `GET /ml/templates`: summary of the templates the trained model knows.
#[derive(Debug, Clone, Deserialize)]
pub struct MlTemplatesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub templates: Vec<MlTemplateSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MlTemplateSummary {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub field_count: usize,
}

// --- POST /ml/smart-generate ---------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SmartGenerateRequest {
    pub template_name: String,
    pub data: serde_json::Map<String, serde_json::Value>,
}

// --- POST /pdf/import, POST /pdf/import-ai ------------------------------------

/// Both import endpoints return a template JSON; `import-ai` always carries
/// per-field label/name/type/x/y/width/height.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "pageWidth")]
    pub width: Option<f64>,
    #[serde(default, alias = "pageHeight")]
    pub height: Option<f64>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

// --- POST /templates/save ------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SaveTemplateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// --- POST /pdf/generate-json -----------------------------------------------------

/// Submission shape of the form generation workflow: a trimmed template plus
/// the collected data object.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateJsonRequest {
    pub template: GenerationTemplate,
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTemplate {
    pub name: String,
    pub fields: Vec<Field>,
    pub page_width: f64,
    pub page_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_file_path: Option<String>,
}

impl From<&Template> for GenerationTemplate {
    fn from(template: &Template) -> Self {
        Self {
            name: template.name.clone(),
            fields: template.fields.clone(),
            page_width: template.page_width,
            page_height: template.page_height,
            pdf_file_path: template.pdf_file_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_message_prefers_detail_over_message_over_error() {
        let body = json!({"detail": "d", "message": "m", "error": "e"});
        assert_eq!(backend_message(&body).as_deref(), Some("d"));
        let body = json!({"message": "m", "error": "e"});
        assert_eq!(backend_message(&body).as_deref(), Some("m"));
        let body = json!({"error": "e"});
        assert_eq!(backend_message(&body).as_deref(), Some("e"));
        assert_eq!(backend_message(&json!({"status": 500})), None);
    }

    #[test]
    fn top_scores_sorts_descending_and_truncates() {
        let scores: HashMap<String, f64> = [
            ("invoice".to_string(), 0.42),
            ("receipt".to_string(), 0.91),
            ("po".to_string(), 0.17),
            ("waybill".to_string(), 0.55),
        ]
        .into_iter()
        .collect();
        let top = top_scores(&scores, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, "receipt");
        assert_eq!(top[1].0, "waybill");
        assert_eq!(top[2].0, "invoice");
    }

    #[test]
    fn ml_template_converts_to_model_template() {
        let ml: MlTemplate = serde_json::from_value(json!({
            "id": "invoice", "name": "Invoice", "width": 595, "height": 842,
            "fields": [{"name": "total", "type": "number", "x": 10, "y": 20, "width": 80, "height": 18}]
        }))
        .unwrap();
        let template = ml.into_template();
        assert_eq!(template.page_width, 595.0);
        assert_eq!(template.fields.len(), 1);
        assert_eq!(template.fields[0].name, "total");
    }
}

//! Update logic shared by all four upload tools.
//!
//! One request is in flight per user action; the busy flag blocks
//! resubmission and is always cleared when the request settles, whatever the
//! outcome. Validation failures never reach the network.

use common::api::{
    backend_message, top_scores, ApiError, AutoGenerateResponse, DetectResponse, ExtractResponse,
    ImportedTemplate, SmartGenerateRequest,
};
use common::forms::validate_pdf_upload;
use common::model::template::Template;
use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{download_pdf, now_iso, now_ms, show_toast};
use crate::storage::store;

use super::messages::Msg;
use super::props::ToolKind;
use super::state::{Outcome, ToolError, UploadTool};

pub fn update(component: &mut UploadTool, ctx: &Context<UploadTool>, msg: Msg) -> bool {
    let kind = ctx.props().kind;
    match msg {
        Msg::Browse => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::DragOver(over) => {
            let changed = component.drag_over != over;
            component.drag_over = over;
            changed
        }
        Msg::SetTemplateName(name) => {
            component.template_name = name;
            false
        }
        Msg::FileChosen(file) => {
            component.drag_over = false;
            if let Err(err) = validate_pdf_upload(&file.type_(), &file.name()) {
                component.error = Some(ToolError::message_only(err.to_string()));
                return true;
            }
            if component.busy {
                return false;
            }
            component.busy = true;
            component.error = None;
            component.outcome = None;

            let mut extra = Vec::new();
            if kind == ToolKind::AutoGenerate && !component.template_name.trim().is_empty() {
                extra.push(("template_name", component.template_name.trim().to_string()));
            }

            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::post_pdf(kind.endpoint(), &file, &extra).await;
                link.send_message(Msg::Finished(result));
            });
            true
        }
        Msg::Finished(result) => {
            component.busy = false;
            match result {
                Ok(value) => apply_payload(component, kind, value),
                Err(ApiError::Unexpected(message)) => {
                    // Unstructured failure: a single alert, no inline panel.
                    error!(format!("{} returned an unreadable payload: {}", kind.endpoint(), message));
                    show_toast("The request failed with an unexpected response");
                }
                Err(err) => component.error = Some(tool_error(err)),
            }
            true
        }
        Msg::SaveStaged => {
            let Some(Outcome::Staged(template)) = &component.outcome else {
                return false;
            };
            match store().save(template.clone(), &now_iso()) {
                Ok(saved) => show_toast(&format!("Template \"{}\" saved to the library", saved.name)),
                Err(err) => show_toast(&format!("Could not save the template: {}", err)),
            }
            false
        }
        Msg::SmartGenerate => {
            let Some(Outcome::Extraction { template_id, data }) = &component.outcome else {
                return false;
            };
            if component.smart_busy {
                return false;
            }
            component.smart_busy = true;
            let request = SmartGenerateRequest {
                template_name: template_id.clone(),
                data: data.clone(),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::post_json_binary("/ml/smart-generate", &request).await;
                link.send_message(Msg::SmartGenerated(result));
            });
            true
        }
        Msg::SmartGenerated(result) => {
            component.smart_busy = false;
            match result {
                Ok(bytes) => {
                    let name = match &component.outcome {
                        Some(Outcome::Extraction { template_id, .. }) => template_id.clone(),
                        _ => "document".to_string(),
                    };
                    download_pdf(&bytes, &format!("{}_{}.pdf", name, now_ms()));
                    show_toast("Filled PDF downloaded");
                }
                Err(err) => show_toast(&format!("PDF generation failed: {}", err)),
            }
            true
        }
    }
}

/// Maps a 2xx payload onto the tool-specific outcome. Bodies carrying
/// `success: false` are rendered through the inline error panel.
fn apply_payload(component: &mut UploadTool, kind: ToolKind, value: serde_json::Value) {
    match kind {
        ToolKind::Detect => match api::decode::<DetectResponse>(value.clone()) {
            Ok(response) if response.success => {
                let scores = response.all_scores.unwrap_or_default();
                component.outcome = Some(Outcome::Detection {
                    template_name: response
                        .template_name
                        .or(response.template_id)
                        .unwrap_or_else(|| "unknown".to_string()),
                    confidence: response.confidence.unwrap_or(0.0),
                    scores: top_scores(&scores, scores.len()),
                });
            }
            _ => component.error = Some(ToolError::message_only(failure_message(&value))),
        },
        ToolKind::Extract => match api::decode::<ExtractResponse>(value.clone()) {
            Ok(response) if response.success => {
                component.outcome = Some(Outcome::Extraction {
                    template_id: response.template_id.unwrap_or_default(),
                    data: response.data.unwrap_or_default(),
                });
            }
            Ok(response) => {
                let scores = response
                    .details
                    .and_then(|d| d.all_scores)
                    .unwrap_or_default();
                component.error = Some(ToolError {
                    message: response
                        .message
                        .or(response.error)
                        .unwrap_or_else(|| "Extraction failed".to_string()),
                    available_templates: response.available_templates.unwrap_or_default(),
                    top_scores: top_scores(&scores, 3),
                });
            }
            Err(_) => component.error = Some(ToolError::message_only(failure_message(&value))),
        },
        ToolKind::AutoGenerate => match api::decode::<AutoGenerateResponse>(value.clone()) {
            Ok(response) => match response.template {
                Some(template) if response.success => {
                    component.outcome = Some(Outcome::Staged(template.into_template()));
                }
                _ => component.error = Some(ToolError::message_only(failure_message(&value))),
            },
            Err(_) => component.error = Some(ToolError::message_only(failure_message(&value))),
        },
        ToolKind::ImportAi => match api::decode::<ImportedTemplate>(value.clone()) {
            Ok(imported) if !imported.fields.is_empty() => {
                let mut template =
                    Template::new(imported.name.as_deref().unwrap_or("Imported template"));
                if let Some(width) = imported.width {
                    template.page_width = width;
                }
                if let Some(height) = imported.height {
                    template.page_height = height;
                }
                template.fields = imported.fields;
                component.outcome = Some(Outcome::Staged(template));
            }
            _ => component.error = Some(ToolError::message_only(failure_message(&value))),
        },
    }
}

fn failure_message(value: &serde_json::Value) -> String {
    backend_message(value).unwrap_or_else(|| "The backend returned an unusable result".to_string())
}

/// Builds the inline panel for a transport or structured HTTP failure,
/// lifting available templates and detection scores out of the body when the
/// backend provided them.
fn tool_error(err: ApiError) -> ToolError {
    match err {
        ApiError::Backend { message, body, .. } => {
            let available = body
                .get("available_templates")
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            let scores = body
                .pointer("/details/all_scores")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .map(|scores: std::collections::HashMap<String, f64>| top_scores(&scores, 3))
                .unwrap_or_default();
            ToolError {
                message,
                available_templates: available,
                top_scores: scores,
            }
        }
        other => ToolError::message_only(other.to_string()),
    }
}

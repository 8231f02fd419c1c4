//! Result and error panels for the upload tools.

use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{Outcome, ToolError, UploadTool};

pub fn outcome_panel(component: &UploadTool, link: &Scope<UploadTool>) -> Html {
    let Some(outcome) = &component.outcome else {
        return html! {};
    };

    match outcome {
        Outcome::Detection {
            template_name,
            confidence,
            scores,
        } => html! {
            <div class="result-panel">
                <p>
                    <strong>{ template_name.clone() }</strong>
                    { format!(" — {:.1}% confidence", confidence * 100.0) }
                </p>
                <ul class="score-list">
                    {
                        for scores.iter().map(|(name, score)| html! {
                            <li>{ format!("{}: {:.1}%", name, score * 100.0) }</li>
                        })
                    }
                </ul>
            </div>
        },
        Outcome::Extraction { template_id, data } => html! {
            <div class="result-panel">
                <p>{ format!("Matched template: {}", template_id) }</p>
                <table class="data-table">
                    <tbody>
                        {
                            for data.iter().map(|(key, value)| html! {
                                <tr>
                                    <td>{ key.clone() }</td>
                                    <td>{ render_value(value) }</td>
                                </tr>
                            })
                        }
                    </tbody>
                </table>
                <button
                    disabled={component.smart_busy}
                    onclick={link.callback(|_| Msg::SmartGenerate)}
                >
                    { if component.smart_busy { "Generating…" } else { "Generate filled PDF" } }
                </button>
            </div>
        },
        Outcome::Staged(template) => html! {
            <div class="result-panel">
                <p>
                    <strong>{ template.name.clone() }</strong>
                    { format!(" — {} field(s), {}×{} pt", template.fields.len(),
                              template.page_width, template.page_height) }
                </p>
                <ul class="field-list">
                    {
                        for template.fields.iter().map(|field| html! {
                            <li>{ format!("{} ({}) @ {},{}",
                                field.name, field.field_type.as_str(), field.x, field.y) }</li>
                        })
                    }
                </ul>
                <button onclick={link.callback(|_| Msg::SaveStaged)}>
                    { "Save to template library" }
                </button>
            </div>
        },
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn error_panel(error: &Option<ToolError>) -> Html {
    let Some(error) = error else {
        return html! {};
    };
    html! {
        <div class="error-panel">
            <p>{ error.message.clone() }</p>
            {
                if error.top_scores.is_empty() {
                    html! {}
                } else {
                    html! {
                        <>
                            <p class="error-detail">{"Closest matches:"}</p>
                            <ul>
                                {
                                    for error.top_scores.iter().map(|(name, score)| html! {
                                        <li>{ format!("{}: {:.1}%", name, score * 100.0) }</li>
                                    })
                                }
                            </ul>
                        </>
                    }
                }
            }
            {
                if error.available_templates.is_empty() {
                    html! {}
                } else {
                    html! {
                        <p class="error-detail">
                            { format!("Available templates: {}", error.available_templates.join(", ")) }
                        </p>
                    }
                }
            }
        </div>
    }
}

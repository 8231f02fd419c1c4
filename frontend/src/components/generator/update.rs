//! Update logic for the form generation workflow: form state, bulk JSON
//! import, sample fill, and the generate-and-download submission.

use common::api::{ApiError, GenerateJsonRequest, GenerationTemplate};
use common::forms::{apply_import, collect_form_data, sample_value, RawValue};
use common::model::records::RecentGeneration;
use gloo_console::error;
use gloo_file::futures::read_as_bytes;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{download_pdf, now_iso, now_ms, show_toast, today};
use crate::storage::store;

use super::messages::Msg;
use super::state::GeneratorComponent;

pub fn update(
    component: &mut GeneratorComponent,
    ctx: &Context<GeneratorComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Select(id) => {
            component.selected = component.templates.iter().find(|t| t.id == id).cloned();
            component.values.clear();
            component.error = None;
            true
        }
        Msg::SetText { name, value } => {
            component.values.insert(name, RawValue::Text(value));
            false
        }
        Msg::SetChecked { name, checked } => {
            component.values.insert(name, RawValue::Checked(checked));
            false
        }
        Msg::SetCell { name, row, col, value } => {
            let dims = component.selected.as_ref().and_then(|t| {
                t.fields.iter().find(|f| f.name == name).map(|f| {
                    (
                        f.table_rows.unwrap_or(0) as usize,
                        f.table_columns.unwrap_or(0) as usize,
                    )
                })
            });
            let Some((rows, columns)) = dims else {
                return false;
            };
            let grid = component.table_grid(&name, rows, columns);
            if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = value;
            }
            false
        }
        Msg::OpenImport => {
            if let Some(input) = component.import_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::ImportChosen(file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match read_as_bytes(&gloo_file::File::from(file)).await {
                    Ok(bytes) => String::from_utf8(bytes)
                        .map_err(|_| "the file is not valid UTF-8".to_string())
                        .and_then(|text| {
                            serde_json::from_str(&text)
                                .map_err(|err| format!("the file is not valid JSON: {}", err))
                        }),
                    Err(err) => Err(format!("could not read the file: {}", err)),
                };
                link.send_message(Msg::ImportParsed(result));
            });
            false
        }
        Msg::ImportParsed(result) => {
            match result {
                Ok(document) => {
                    let Some(template) = &component.selected else {
                        show_toast("Select a template before importing data");
                        return true;
                    };
                    let imported = apply_import(&template.fields, &document);
                    let count = imported.len();
                    component.values.extend(imported);
                    show_toast(&format!("Prefilled {} field(s) from JSON", count));
                }
                Err(message) => show_toast(&format!("Import failed: {}", message)),
            }
            true
        }
        Msg::FillSample => {
            let Some(template) = &component.selected else {
                return false;
            };
            let date = today();
            let mut rng = js_sys::Math::random;
            for field in &template.fields {
                if let Some(value) = sample_value(field, &mut rng, &date) {
                    component.values.insert(field.name.clone(), value);
                }
            }
            true
        }
        Msg::Generate => {
            let Some(template) = &component.selected else {
                show_toast("Select a template first");
                return true;
            };
            if component.busy {
                return false;
            }
            component.busy = true;
            component.error = None;

            let data = collect_form_data(&template.fields, &component.values);
            component.pending_data = Some(data.clone());
            let request = GenerateJsonRequest {
                template: GenerationTemplate::from(template),
                data,
            };

            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::post_json_binary("/pdf/generate-json", &request).await;
                link.send_message(Msg::Generated(result));
            });
            true
        }
        Msg::Generated(result) => {
            component.busy = false;
            match result {
                Ok(bytes) => {
                    let Some(template) = &component.selected else {
                        return true;
                    };
                    download_pdf(&bytes, &format!("{}_{}.pdf", template.name, now_ms()));

                    let data = component.pending_data.take().unwrap_or_default();
                    let record = RecentGeneration {
                        template_id: template.id.clone(),
                        template_name: template.name.clone(),
                        data: serde_json::Value::Object(data),
                        timestamp: now_iso(),
                    };
                    if let Err(err) = store().save_recent_generation(record) {
                        error!(format!("could not log the generation: {}", err));
                    }
                    component.recent = store().recent_generations();
                    show_toast("PDF generated");
                }
                Err(ApiError::Unexpected(message)) => {
                    error!(format!("generation returned an unreadable payload: {}", message));
                    show_toast("PDF generation failed");
                }
                Err(err) => component.error = Some(err.to_string()),
            }
            true
        }
    }
}

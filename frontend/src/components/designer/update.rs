//! Update function for the template designer.
//!
//! Elm-style: receives the state, the context and a message, mutates the
//! state and returns whether the view should re-render. Pointer handling,
//! property edits, save/load and the PDF import all run through here; the
//! field/object mapping itself lives in `common::codec`.

use common::api::{ApiError, ImportedTemplate, SaveTemplateResponse};
use common::codec::{field_from_object, new_object, object_from_field, CanvasObject};
use common::forms::validate_pdf_upload;
use common::model::field::FieldType;
use common::model::template::{Template, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use gloo_console::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{confirm, now_iso, show_toast};
use crate::storage::store;

use super::messages::{Msg, PropEdit};
use super::state::{DesignerComponent, DragState};

pub fn update(component: &mut DesignerComponent, ctx: &Context<DesignerComponent>, msg: Msg) -> bool {
    match msg {
        Msg::AddField(field_type) => {
            component
                .objects
                .push(new_object(field_type, component.objects.len()));
            component.selected = Some(component.objects.len() - 1);
            true
        }
        Msg::Select(index) => {
            component.selected = index;
            true
        }
        Msg::PointerDown { index, x, y } => {
            component.selected = Some(index);
            component.drag = Some(DragState {
                index,
                last_x: x,
                last_y: y,
            });
            true
        }
        Msg::PointerMove { x, y } => {
            let zoom = component.zoom;
            let Some(drag) = &mut component.drag else {
                return false;
            };
            let dx = (x - drag.last_x) / zoom;
            let dy = (y - drag.last_y) / zoom;
            drag.last_x = x;
            drag.last_y = y;
            let index = drag.index;
            if let Some(object) = component.objects.get_mut(index) {
                object.x = (object.x + dx).max(0.0);
                object.y = (object.y + dy).max(0.0);
            }
            true
        }
        Msg::PointerUp => {
            let was_dragging = component.drag.is_some();
            component.drag = None;
            was_dragging
        }
        Msg::DeleteSelected => {
            if let Some(index) = component.selected.take() {
                if index < component.objects.len() {
                    component.objects.remove(index);
                }
            }
            true
        }
        Msg::ClearCanvas => {
            if component.objects.is_empty() {
                return false;
            }
            if confirm("Clear the canvas? All objects on it will be removed.") {
                component.objects.clear();
                component.selected = None;
            }
            true
        }
        Msg::SetTemplateName(name) => {
            component.template_name = name;
            true
        }
        Msg::Edit(edit) => apply_edit(component, edit),
        Msg::SetZoom(zoom) => {
            component.zoom = zoom.clamp(0.25, 3.0);
            true
        }
        Msg::Save => {
            if component.template_name.trim().is_empty() {
                show_toast("Give the template a name before saving");
                return true;
            }
            if component.objects.is_empty() {
                show_toast("Add at least one field before saving");
                return true;
            }
            if component.busy {
                return false;
            }

            let template = Template {
                id: String::new(),
                name: component.template_name.trim().to_string(),
                page_width: component.page_width,
                page_height: component.page_height,
                fields: component.objects.iter().map(field_from_object).collect(),
                created_at: None,
                pdf_file_path: None,
            };

            // Local persistence comes first: the draft is never lost even if
            // the backend is down.
            let saved = match store().save(template, &now_iso()) {
                Ok(saved) => saved,
                Err(err) => {
                    show_toast(&format!("Could not save the template: {}", err));
                    return true;
                }
            };
            component.original_md5 = Some(component.digest());
            component.saved_templates = store().get_all();
            component.busy = true;

            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::post_json("/templates/save", &saved)
                    .await
                    .and_then(api::decode::<SaveTemplateResponse>);
                link.send_message(Msg::RemoteSaveDone(result));
            });
            true
        }
        Msg::RemoteSaveDone(result) => {
            component.busy = false;
            match result {
                Ok(response) if response.success => show_toast("Template saved"),
                Ok(response) => show_toast(&format!(
                    "Template saved locally; backend rejected it: {}",
                    response.message.unwrap_or_else(|| "no reason given".to_string())
                )),
                Err(err) => {
                    warn!(format!("remote template save failed: {}", err));
                    show_toast(&format!("Template saved locally only — {}", err));
                }
            }
            true
        }
        Msg::LoadTemplate(id) => {
            let Some(template) = store().get_by_id(&id) else {
                show_toast("That template no longer exists");
                component.saved_templates = store().get_all();
                return true;
            };
            // Clearing first: loading is the exact inverse of saving.
            component.objects = template.fields.iter().map(object_from_field).collect();
            component.template_name = template.name;
            component.page_width = template.page_width;
            component.page_height = template.page_height;
            component.selected = None;
            component.drag = None;
            component.original_md5 = Some(component.digest());
            show_toast("Template loaded");
            true
        }
        Msg::OpenImportDialog => {
            if let Some(input) = component.import_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::ImportFileSelected(file) => {
            if let Err(err) = validate_pdf_upload(&file.type_(), &file.name()) {
                show_toast(&err.to_string());
                return true;
            }
            if component.busy {
                return false;
            }
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::post_pdf("/pdf/import", &file, &[])
                    .await
                    .and_then(api::decode::<ImportedTemplate>);
                link.send_message(Msg::ImportFinished(result));
            });
            true
        }
        Msg::ImportFinished(result) => {
            component.busy = false;
            match result {
                Ok(imported) => {
                    component.objects =
                        imported.fields.iter().map(object_from_field).collect();
                    if let Some(name) = imported.name {
                        component.template_name = name;
                    }
                    component.page_width = imported.width.unwrap_or(DEFAULT_PAGE_WIDTH);
                    component.page_height = imported.height.unwrap_or(DEFAULT_PAGE_HEIGHT);
                    component.selected = None;
                    component.original_md5 = None;
                    show_toast(&format!(
                        "Imported {} field(s) from the PDF",
                        component.objects.len()
                    ));
                }
                Err(ApiError::Unexpected(err)) => {
                    warn!(format!("pdf import returned an unreadable payload: {}", err));
                    show_toast("PDF import failed");
                }
                Err(err) => show_toast(&format!("PDF import failed: {}", err)),
            }
            true
        }
    }
}

/// Applies one property-panel edit to the selected object.
fn apply_edit(component: &mut DesignerComponent, edit: PropEdit) -> bool {
    let Some(object) = component.selected_object_mut() else {
        return false;
    };
    match edit {
        PropEdit::Name(name) => object.name = name,
        PropEdit::Label(label) => {
            object.label = label;
            object.refresh_label_extent();
        }
        PropEdit::Kind(kind) => {
            object.field_type = kind;
            match kind {
                FieldType::Table if object.table.is_none() => {
                    let replacement = new_object(FieldType::Table, 0);
                    object.table = replacement.table;
                    object.width = replacement.width;
                    object.height = replacement.height;
                }
                FieldType::Table => {}
                _ => object.table = None,
            }
            object.refresh_label_extent();
        }
        PropEdit::X(x) => object.x = x.max(0.0),
        PropEdit::Y(y) => object.y = y.max(0.0),
        PropEdit::Width(width) => {
            if !object.accepts_box_resize() {
                show_toast("Labels size themselves from the font — change the font size instead");
                return true;
            }
            object.width = width.max(1.0);
        }
        PropEdit::Height(height) => {
            if !object.accepts_box_resize() {
                show_toast("Labels size themselves from the font — change the font size instead");
                return true;
            }
            object.height = height.max(1.0);
        }
        PropEdit::FontSize(size) => {
            object.font_size = size.clamp(4.0, 144.0);
            object.refresh_label_extent();
        }
        PropEdit::FontWeight(weight) => object.font_weight = weight,
        PropEdit::TableRows(rows) => {
            if let Some(meta) = object.table.as_mut() {
                meta.rows = rows.max(1);
            }
            resize_table(object);
        }
        PropEdit::TableColumns(columns) => {
            if let Some(meta) = object.table.as_mut() {
                meta.columns = columns.max(1);
                meta.headers.truncate(meta.columns as usize);
            }
            resize_table(object);
        }
        PropEdit::TableHeaders(raw) => {
            if let Some(meta) = &mut object.table {
                let columns = meta.columns as usize;
                meta.headers = raw
                    .split(',')
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
                    .take(columns)
                    .collect();
            }
        }
    }
    true
}

/// Keeps a table's outer box in sync with its grid dimensions.
fn resize_table(object: &mut CanvasObject) {
    let dims = object
        .table
        .as_ref()
        .map(|meta| (meta.rows, meta.columns, meta.cell_width, meta.cell_height));
    if let Some((rows, columns, cell_width, cell_height)) = dims {
        object.width = columns as f64 * cell_width;
        object.height = rows as f64 * cell_height;
    }
}

//! View rendering for the template designer: toolbar, the zoomed page
//! canvas with its drawable objects, and the property panel for the current
//! selection.

use common::codec::CanvasObject;
use common::model::field::FieldType;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::{Msg, PropEdit};
use super::state::DesignerComponent;

pub fn view(component: &DesignerComponent, ctx: &Context<DesignerComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="designer-root">
            { toolbar(component, link) }
            <div class="designer-body">
                { canvas(component, link) }
                { property_panel(component, link) }
            </div>
        </div>
    }
}

fn toolbar(component: &DesignerComponent, link: &Scope<DesignerComponent>) -> Html {
    let dirty_dot = if component.dirty() {
        html! { <span class="dirty-dot" title="Unsaved changes" /> }
    } else {
        html! {}
    };

    html! {
        <div class="designer-toolbar">
            <div class="toolbar-group">
                {
                    for FieldType::all().into_iter().map(|kind| html! {
                        <button
                            class="tool-btn"
                            onclick={link.callback(move |_| Msg::AddField(kind))}
                        >
                            { format!("+ {}", kind.as_str()) }
                        </button>
                    })
                }
            </div>

            <div class="toolbar-group">
                <input
                    class="template-name"
                    placeholder="Template name"
                    value={component.template_name.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetTemplateName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
                { dirty_dot }
                <button class="tool-btn" disabled={component.busy} onclick={link.callback(|_| Msg::Save)}>
                    { if component.busy { "Saving…" } else { "Save" } }
                </button>
                <button class="tool-btn" onclick={link.callback(|_| Msg::DeleteSelected)}>{"Delete"}</button>
                <button class="tool-btn" onclick={link.callback(|_| Msg::ClearCanvas)}>{"Clear"}</button>
                <button class="tool-btn" onclick={link.callback(|_| Msg::OpenImportDialog)}>{"Import PDF"}</button>
                <input
                    type="file"
                    accept="application/pdf"
                    style="display: none;"
                    ref={component.import_input_ref.clone()}
                    onchange={link.batch_callback(|e: Event| {
                        let input = e.target_unchecked_into::<HtmlInputElement>();
                        let file = input.files().and_then(|files| files.get(0));
                        input.set_value("");
                        file.map(Msg::ImportFileSelected)
                    })}
                />
            </div>

            <div class="toolbar-group">
                <select onchange={link.batch_callback(|e: Event| {
                    let id = e.target_unchecked_into::<HtmlSelectElement>().value();
                    (!id.is_empty()).then(|| Msg::LoadTemplate(id))
                })}>
                    <option value="" selected=true>{"Load template…"}</option>
                    {
                        for component.saved_templates.iter().map(|t| html! {
                            <option value={t.id.clone()}>{ t.name.clone() }</option>
                        })
                    }
                </select>

                <select onchange={link.batch_callback(|e: Event| {
                    e.target_unchecked_into::<HtmlSelectElement>()
                        .value()
                        .parse::<f64>()
                        .ok()
                        .map(Msg::SetZoom)
                })}>
                    { zoom_option(0.5, component.zoom) }
                    { zoom_option(0.75, component.zoom) }
                    { zoom_option(1.0, component.zoom) }
                    { zoom_option(1.5, component.zoom) }
                </select>
            </div>
        </div>
    }
}

fn zoom_option(level: f64, current: f64) -> Html {
    html! {
        <option value={level.to_string()} selected={(level - current).abs() < f64::EPSILON}>
            { format!("{}%", (level * 100.0) as u32) }
        </option>
    }
}

fn canvas(component: &DesignerComponent, link: &Scope<DesignerComponent>) -> Html {
    let zoom = component.zoom;
    let style = format!(
        "position: relative;
         width: {}px;
         height: {}px;
         margin: 16px auto;
         background: white;
         box-shadow: 0 0 8px #ccc;
         overflow: hidden;",
        component.page_width * zoom,
        component.page_height * zoom
    );

    html! {
        <div
            class="designer-canvas"
            style={style}
            onmousedown={link.callback(|_| Msg::Select(None))}
            onmousemove={link.callback(|e: MouseEvent| Msg::PointerMove {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            })}
            onmouseup={link.callback(|_| Msg::PointerUp)}
            onmouseleave={link.callback(|_| Msg::PointerUp)}
        >
            {
                for component.objects.iter().enumerate().map(|(index, object)| {
                    canvas_object(object, index, zoom, component.selected == Some(index), link)
                })
            }
        </div>
    }
}

fn canvas_object(
    object: &CanvasObject,
    index: usize,
    zoom: f64,
    selected: bool,
    link: &Scope<DesignerComponent>,
) -> Html {
    let mut style = format!(
        "position: absolute;
         left: {}px; top: {}px;
         width: {}px; height: {}px;
         font-size: {}px;
         font-weight: {};
         font-family: {}, sans-serif;
         cursor: move;
         box-sizing: border-box;
         user-select: none;",
        object.x * zoom,
        object.y * zoom,
        object.width * zoom,
        object.height * zoom,
        object.font_size * zoom,
        object.font_weight,
        object.font_family,
    );
    match object.field_type {
        FieldType::Label => style.push_str("color: #333; white-space: nowrap;"),
        _ => style.push_str("border: 1px solid #555; background: rgba(25, 118, 210, 0.05);"),
    }
    if selected {
        style.push_str("outline: 2px solid #1976d2; z-index: 2;");
    }

    let onmousedown = link.callback(move |e: MouseEvent| {
        e.stop_propagation();
        e.prevent_default();
        Msg::PointerDown {
            index,
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        }
    });

    let body = match object.field_type {
        FieldType::Label => html! { { object.label.clone() } },
        FieldType::Table => table_body(object, zoom),
        _ => html! { <span class="object-tag">{ object.name.clone() }</span> },
    };

    html! {
        <div style={style} onmousedown={onmousedown}>
            { body }
        </div>
    }
}

/// Row/column divider lines plus optional header text, all inside the one
/// selectable table unit.
fn table_body(object: &CanvasObject, zoom: f64) -> Html {
    let Some(meta) = &object.table else {
        return html! {};
    };
    let columns = (1..meta.columns).map(|c| {
        let left = c as f64 * meta.cell_width * zoom;
        html! {
            <div style={format!(
                "position: absolute; left: {}px; top: 0; width: 1px; height: 100%; background: #888;",
                left
            )} />
        }
    });
    let rows = (1..meta.rows).map(|r| {
        let top = r as f64 * meta.cell_height * zoom;
        html! {
            <div style={format!(
                "position: absolute; top: {}px; left: 0; height: 1px; width: 100%; background: #888;",
                top
            )} />
        }
    });
    let headers = meta.headers.iter().enumerate().map(|(c, header)| {
        let left = c as f64 * meta.cell_width * zoom;
        html! {
            <div style={format!(
                "position: absolute; left: {}px; top: 0; width: {}px; height: {}px;
                 overflow: hidden; text-align: center; font-weight: bold;",
                left,
                meta.cell_width * zoom,
                meta.cell_height * zoom
            )}>
                { header.clone() }
            </div>
        }
    });

    html! {
        <>
            { for columns }
            { for rows }
            { for headers }
        </>
    }
}

fn property_panel(component: &DesignerComponent, link: &Scope<DesignerComponent>) -> Html {
    let Some(object) = component.selected_object() else {
        return html! {
            <aside class="property-panel">
                <p class="panel-hint">{"Select an object to edit its properties."}</p>
            </aside>
        };
    };

    html! {
        <aside class="property-panel">
            <h3>{"Field properties"}</h3>
            { text_prop(link, "Name", &object.name, PropEdit::Name) }
            { text_prop(link, "Label", &object.label, PropEdit::Label) }

            <label>{"Type"}</label>
            <select onchange={link.batch_callback(|e: Event| {
                FieldType::from_str(&e.target_unchecked_into::<HtmlSelectElement>().value())
                    .map(|kind| Msg::Edit(PropEdit::Kind(kind)))
            })}>
                {
                    for FieldType::all().into_iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={kind == object.field_type}>
                            { kind.as_str() }
                        </option>
                    })
                }
            </select>

            { number_prop(link, "X", object.x, PropEdit::X) }
            { number_prop(link, "Y", object.y, PropEdit::Y) }
            { number_prop(link, "Width", object.width, PropEdit::Width) }
            { number_prop(link, "Height", object.height, PropEdit::Height) }
            { number_prop(link, "Font size", object.font_size, PropEdit::FontSize) }

            <label>{"Font weight"}</label>
            <select onchange={link.callback(|e: Event| {
                Msg::Edit(PropEdit::FontWeight(
                    e.target_unchecked_into::<HtmlSelectElement>().value(),
                ))
            })}>
                <option value="normal" selected={object.font_weight == "normal"}>{"normal"}</option>
                <option value="bold" selected={object.font_weight == "bold"}>{"bold"}</option>
            </select>

            { table_props(object, link) }
        </aside>
    }
}

fn table_props(object: &CanvasObject, link: &Scope<DesignerComponent>) -> Html {
    let Some(meta) = &object.table else {
        return html! {};
    };
    html! {
        <>
            { number_prop(link, "Rows", meta.rows as f64, |v| PropEdit::TableRows(v as u32)) }
            { number_prop(link, "Columns", meta.columns as f64, |v| PropEdit::TableColumns(v as u32)) }
            { text_prop(link, "Headers (comma-separated)", &meta.headers.join(", "), PropEdit::TableHeaders) }
        </>
    }
}

fn text_prop(
    link: &Scope<DesignerComponent>,
    label: &str,
    value: &str,
    edit: impl Fn(String) -> PropEdit + 'static,
) -> Html {
    html! {
        <>
            <label>{ label }</label>
            <input
                value={value.to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    Msg::Edit(edit(e.target_unchecked_into::<HtmlInputElement>().value()))
                })}
            />
        </>
    }
}

fn number_prop(
    link: &Scope<DesignerComponent>,
    label: &str,
    value: f64,
    edit: impl Fn(f64) -> PropEdit + 'static,
) -> Html {
    html! {
        <>
            <label>{ label }</label>
            <input
                type="number"
                value={format!("{}", value.round())}
                onchange={link.batch_callback(move |e: Event| {
                    e.target_unchecked_into::<HtmlInputElement>()
                        .value()
                        .parse::<f64>()
                        .ok()
                        .map(|v| Msg::Edit(edit(v)))
                })}
            />
        </>
    }
}

//! View for the form generation workflow: template picker, the dynamically
//! built data-entry form, action buttons and the recent-generations list.

use std::collections::HashMap;

use common::forms::RawValue;
use common::model::field::{Field, FieldType};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::GeneratorComponent;

pub fn view(component: &GeneratorComponent, ctx: &Context<GeneratorComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="generator-root">
            <div class="generator-form">
                <select onchange={link.batch_callback(|e: Event| {
                    let id = e.target_unchecked_into::<HtmlSelectElement>().value();
                    (!id.is_empty()).then(|| Msg::Select(id))
                })}>
                    <option value="" selected={component.selected.is_none()}>
                        {"Choose a template…"}
                    </option>
                    {
                        for component.templates.iter().map(|t| {
                            let active = component.selected.as_ref().map(|s| s.id == t.id).unwrap_or(false);
                            html! {
                                <option value={t.id.clone()} selected={active}>
                                    { format!("{} ({} fields)", t.name, t.fields.len()) }
                                </option>
                            }
                        })
                    }
                </select>

                { form_body(component, link) }
            </div>

            <aside class="generator-side">
                { actions(component, link) }
                {
                    if let Some(error) = &component.error {
                        html! { <div class="error-panel"><p>{ error.clone() }</p></div> }
                    } else {
                        html! {}
                    }
                }
                { recent_list(component) }
            </aside>
        </div>
    }
}

fn form_body(component: &GeneratorComponent, link: &Scope<GeneratorComponent>) -> Html {
    let Some(template) = &component.selected else {
        return html! { <p class="panel-hint">{"Pick a template to build its form."}</p> };
    };

    html! {
        <form onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Generate
        })}>
            {
                for template
                    .fields
                    .iter()
                    .filter(|field| field.field_type != FieldType::Label)
                    .map(|field| field_control(field, &component.values, link))
            }
            <button type="submit" disabled={component.busy}>
                { if component.busy { "Generating…" } else { "Generate PDF" } }
            </button>
        </form>
    }
}

fn field_control(
    field: &Field,
    values: &HashMap<String, RawValue>,
    link: &Scope<GeneratorComponent>,
) -> Html {
    let label = if field.label.is_empty() {
        field.name.clone()
    } else {
        field.label.clone()
    };

    let control = match field.field_type {
        FieldType::Checkbox => checkbox_control(field, values, link),
        FieldType::Table => table_control(field, values, link),
        _ => input_control(field, values, link),
    };

    html! {
        <div class="form-row">
            <label>{ label }</label>
            { control }
        </div>
    }
}

fn input_control(
    field: &Field,
    values: &HashMap<String, RawValue>,
    link: &Scope<GeneratorComponent>,
) -> Html {
    let input_type = match field.field_type {
        FieldType::Number => "number",
        FieldType::Date => "date",
        _ => "text",
    };
    let value = match values.get(&field.name) {
        Some(RawValue::Text(text)) => text.clone(),
        _ => String::new(),
    };
    let name = field.name.clone();
    html! {
        <input
            type={input_type}
            value={value}
            oninput={link.callback(move |e: InputEvent| Msg::SetText {
                name: name.clone(),
                value: e.target_unchecked_into::<HtmlInputElement>().value(),
            })}
        />
    }
}

fn checkbox_control(
    field: &Field,
    values: &HashMap<String, RawValue>,
    link: &Scope<GeneratorComponent>,
) -> Html {
    let checked = matches!(values.get(&field.name), Some(RawValue::Checked(true)));
    let name = field.name.clone();
    html! {
        <input
            type="checkbox"
            checked={checked}
            onchange={link.callback(move |e: Event| Msg::SetChecked {
                name: name.clone(),
                checked: e.target_unchecked_into::<HtmlInputElement>().checked(),
            })}
        />
    }
}

fn table_control(
    field: &Field,
    values: &HashMap<String, RawValue>,
    link: &Scope<GeneratorComponent>,
) -> Html {
    let rows = field.table_rows.unwrap_or(0) as usize;
    let columns = field.table_columns.unwrap_or(0) as usize;
    let headers = field.table_headers.as_deref().unwrap_or(&[]);

    let header_row = if headers.is_empty() {
        html! {}
    } else {
        html! {
            <tr>
                { for (0..columns).map(|c| html! {
                    <th>{ headers.get(c).cloned().unwrap_or_default() }</th>
                }) }
            </tr>
        }
    };

    html! {
        <table class="entry-grid">
            <tbody>
                { header_row }
                {
                    for (0..rows).map(|r| html! {
                        <tr>
                            {
                                for (0..columns).map(|c| {
                                    let name = field.name.clone();
                                    let value = cell_value(values, &field.name, r, c);
                                    html! {
                                        <td>
                                            <input
                                                value={value}
                                                oninput={link.callback(move |e: InputEvent| Msg::SetCell {
                                                    name: name.clone(),
                                                    row: r,
                                                    col: c,
                                                    value: e.target_unchecked_into::<HtmlInputElement>().value(),
                                                })}
                                            />
                                        </td>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </tbody>
        </table>
    }
}

fn cell_value(values: &HashMap<String, RawValue>, name: &str, row: usize, col: usize) -> String {
    match values.get(name) {
        Some(RawValue::Table(grid)) => grid
            .get(row)
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn actions(component: &GeneratorComponent, link: &Scope<GeneratorComponent>) -> Html {
    html! {
        <div class="generator-actions">
            <button onclick={link.callback(|_| Msg::OpenImport)}>{"Import JSON data"}</button>
            <button onclick={link.callback(|_| Msg::FillSample)}>{"Fill sample data"}</button>
            <input
                type="file"
                accept="application/json"
                style="display: none;"
                ref={component.import_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input = e.target_unchecked_into::<HtmlInputElement>();
                    let file = input.files().and_then(|files| files.get(0));
                    input.set_value("");
                    file.map(Msg::ImportChosen)
                })}
            />
        </div>
    }
}

fn recent_list(component: &GeneratorComponent) -> Html {
    if component.recent.is_empty() {
        return html! {};
    }
    html! {
        <div class="recent-list">
            <h3>{"Recent generations"}</h3>
            <ul>
                {
                    for component.recent.iter().map(|record| html! {
                        <li>
                            <strong>{ record.template_name.clone() }</strong>
                            <span class="timestamp">{ record.timestamp.clone() }</span>
                        </li>
                    })
                }
            </ul>
        </div>
    }
}

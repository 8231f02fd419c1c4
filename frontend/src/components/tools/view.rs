//! View for one upload tool: drop zone, auxiliary inputs, loading state and
//! the result/error panels.

use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

use super::messages::Msg;
use super::props::ToolKind;
use super::render::{error_panel, outcome_panel};
use super::state::UploadTool;

pub fn view(component: &UploadTool, ctx: &Context<UploadTool>) -> Html {
    let link = ctx.link();
    let kind = ctx.props().kind;

    let drop_class = classes!(
        "drop-zone",
        component.drag_over.then_some("drag-over"),
        component.busy.then_some("busy")
    );

    html! {
        <section class="upload-tool">
            <h2>{ kind.title() }</h2>
            <p class="tool-blurb">{ kind.blurb() }</p>

            {
                if kind == ToolKind::AutoGenerate {
                    html! {
                        <input
                            class="aux-input"
                            placeholder="Template name (optional)"
                            value={component.template_name.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetTemplateName(
                                    e.target_unchecked_into::<HtmlInputElement>().value(),
                                )
                            })}
                        />
                    }
                } else {
                    html! {}
                }
            }

            <div
                class={drop_class}
                onclick={link.callback(|_| Msg::Browse)}
                ondragover={link.callback(|e: DragEvent| {
                    e.prevent_default();
                    Msg::DragOver(true)
                })}
                ondragleave={link.callback(|_| Msg::DragOver(false))}
                ondrop={link.batch_callback(|e: DragEvent| {
                    e.prevent_default();
                    e.data_transfer()
                        .and_then(|dt| dt.files())
                        .and_then(|files| files.get(0))
                        .map(Msg::FileChosen)
                })}
            >
                {
                    if component.busy {
                        html! { <span class="spinner">{"Processing…"}</span> }
                    } else {
                        html! { <span>{"Drop a PDF here or click to browse"}</span> }
                    }
                }
            </div>

            <input
                type="file"
                accept="application/pdf"
                style="display: none;"
                ref={component.file_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input = e.target_unchecked_into::<HtmlInputElement>();
                    let file = input.files().and_then(|files| files.get(0));
                    input.set_value("");
                    file.map(Msg::FileChosen)
                })}
            />

            { error_panel(&component.error) }
            { outcome_panel(component, link) }
        </section>
    }
}

//! View for the training workflow: model summary, hyperparameter inputs,
//! progress indicator and log tail.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::messages::Msg;
use super::state::TrainingComponent;

pub fn view(component: &TrainingComponent, ctx: &Context<TrainingComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="training-root">
            { model_summary(component) }

            <div class="training-params">
                <label>{"Epochs"}</label>
                <input
                    type="number"
                    min="1"
                    value={component.params.epochs.to_string()}
                    disabled={component.running}
                    onchange={link.batch_callback(|e: Event| {
                        e.target_unchecked_into::<HtmlInputElement>()
                            .value()
                            .parse::<u32>()
                            .ok()
                            .map(Msg::SetEpochs)
                    })}
                />
                <label>{"Batch size"}</label>
                <input
                    type="number"
                    min="1"
                    value={component.params.batch_size.to_string()}
                    disabled={component.running}
                    onchange={link.batch_callback(|e: Event| {
                        e.target_unchecked_into::<HtmlInputElement>()
                            .value()
                            .parse::<u32>()
                            .ok()
                            .map(Msg::SetBatchSize)
                    })}
                />
                <label>
                    <input
                        type="checkbox"
                        checked={component.params.generate_synthetic}
                        disabled={component.running}
                        onchange={link.callback(|e: Event| {
                            Msg::SetSynthetic(e.target_unchecked_into::<HtmlInputElement>().checked())
                        })}
                    />
                    {"Generate synthetic samples"}
                </label>

                <button disabled={component.running} onclick={link.callback(|_| Msg::Start)}>
                    { if component.running { "Training…" } else { "Start training" } }
                </button>
                <button onclick={link.callback(|_| Msg::Reset)}>{"Reset"}</button>
            </div>

            { progress(component) }

            {
                if let Some(error) = &component.error {
                    html! { <div class="error-panel"><p>{ error.clone() }</p></div> }
                } else {
                    html! {}
                }
            }

            { log_tail(component) }
        </div>
    }
}

fn model_summary(component: &TrainingComponent) -> Html {
    let Some(info) = &component.model_info else {
        return html! {
            <div class="model-summary">
                <p class="panel-hint">{"No model trained yet."}</p>
            </div>
        };
    };
    html! {
        <div class="model-summary">
            <h3>{"Current model"}</h3>
            <ul>
                <li>{ format!("Trained: {}", info.trained_at) }</li>
                <li>{ format!("Accuracy: {:.1}%", info.accuracy * 100.0) }</li>
                <li>{ format!("Epochs: {}", info.epochs) }</li>
                <li>{ format!("Templates: {}", info.template_count) }</li>
                <li>{ format!("Training time: {:.1}s", info.training_time) }</li>
            </ul>
            { known_templates(component) }
        </div>
    }
}

fn known_templates(component: &TrainingComponent) -> Html {
    if component.known_templates.is_empty() {
        return html! {};
    }
    html! {
        <>
            <h4>{"Templates the model knows"}</h4>
            <ul>
                {
                    for component.known_templates.iter().map(|summary| html! {
                        <li>{ format!("{} ({} fields)", summary.name, summary.field_count) }</li>
                    })
                }
            </ul>
        </>
    }
}

fn progress(component: &TrainingComponent) -> Html {
    if !component.running && component.progress == 0.0 {
        return html! {};
    }
    html! {
        <div class="training-progress">
            <div class="progress-track">
                <div
                    class="progress-bar"
                    style={format!("width: {}%;", component.progress.clamp(0.0, 100.0))}
                />
            </div>
            {
                if let Some(message) = &component.message {
                    html! { <p class="progress-message">{ message.clone() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn log_tail(component: &TrainingComponent) -> Html {
    if component.log.is_empty() {
        return html! {};
    }
    // Only the last few lines matter while watching a run.
    let tail: Vec<_> = component.log.iter().rev().take(8).rev().cloned().collect();
    html! {
        <pre class="training-log">{ tail.join("\n") }</pre>
    }
}

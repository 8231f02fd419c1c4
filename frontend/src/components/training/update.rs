//! Update logic for the training workflow.
//!
//! The fixed-interval poll loop lives here: each status response schedules
//! the next timer unless a terminal state was observed. Timers carry the
//! poll epoch they were created under, so a page reset or a restarted run
//! silently invalidates everything still in flight.

use common::api::MlTemplatesResponse;
use common::training::{
    build_training_request, check_template_count, RunEvent, TrainResponse, TrainStatus,
    TrainingGate, TrainingRun, POLL_INTERVAL_MS,
};
use gloo_console::{error, warn};
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{confirm, now_iso, show_toast};
use crate::storage::store;

use super::messages::Msg;
use super::state::TrainingComponent;

pub fn update(component: &mut TrainingComponent, ctx: &Context<TrainingComponent>, msg: Msg) -> bool {
    match msg {
        Msg::SetEpochs(epochs) => {
            component.params.epochs = epochs.max(1);
            false
        }
        Msg::SetBatchSize(batch_size) => {
            component.params.batch_size = batch_size.max(1);
            false
        }
        Msg::SetSynthetic(enabled) => {
            component.params.generate_synthetic = enabled;
            false
        }
        Msg::Start => {
            if component.running {
                return false;
            }
            let templates = store().get_all();
            match check_template_count(templates.len()) {
                TrainingGate::Blocked => {
                    show_toast("No templates stored — create at least one before training");
                    return true;
                }
                TrainingGate::NeedsConfirmation(count) => {
                    let question = format!(
                        "Only {} template(s) are stored; training works best with more. Continue anyway?",
                        count
                    );
                    if !confirm(&question) {
                        return true;
                    }
                }
                TrainingGate::Ready => {}
            }

            component.running = true;
            component.progress = 0.0;
            component.message = None;
            component.log.clear();
            component.error = None;
            component.run = Some(TrainingRun::new(templates.len()));
            component.poll_epoch += 1;

            let request = build_training_request(templates, component.params);
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::post_json("/train", &request)
                    .await
                    .and_then(api::decode::<TrainResponse>);
                link.send_message(Msg::Started(result));
            });
            true
        }
        Msg::Started(result) => match result {
            Ok(response) => {
                if let Some(train_result) = response.result {
                    // Synchronous completion: no polling needed.
                    let info = component
                        .run
                        .get_or_insert_with(|| TrainingRun::new(0))
                        .model_info(Some(&train_result), &now_iso());
                    finish_success(component, info);
                    ctx.link().send_message(Msg::FetchKnownTemplates);
                    return true;
                }
                match response.task_id {
                    Some(task_id) => {
                        component.message = response.message;
                        schedule_poll(ctx, component.poll_epoch, task_id);
                        true
                    }
                    None => {
                        finish_failure(
                            component,
                            "The backend returned neither a result nor a task id".to_string(),
                        );
                        true
                    }
                }
            }
            Err(err) => {
                finish_failure(component, err.to_string());
                true
            }
        },
        Msg::Poll { epoch, task_id } => {
            if epoch != component.poll_epoch || !component.running {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::get_json(&format!("/train/status/{}", task_id))
                    .await
                    .and_then(api::decode::<TrainStatus>);
                link.send_message(Msg::PollResult { epoch, task_id, result });
            });
            false
        }
        Msg::PollResult { epoch, task_id, result } => {
            if epoch != component.poll_epoch {
                return false;
            }
            let status = match result {
                Ok(status) => status,
                Err(err) => {
                    finish_failure(component, err.to_string());
                    return true;
                }
            };

            if let Some(log) = &status.log {
                component.log = log.clone();
            }

            let Some(run) = &mut component.run else {
                return false;
            };
            match run.apply(&status, &now_iso()) {
                RunEvent::Progress { percent, message } => {
                    component.progress = percent;
                    if message.is_some() {
                        component.message = message;
                    }
                    schedule_poll(ctx, epoch, task_id);
                    true
                }
                RunEvent::Completed(info) => {
                    finish_success(component, info);
                    ctx.link().send_message(Msg::FetchKnownTemplates);
                    true
                }
                RunEvent::Failed(message) => {
                    finish_failure(component, message);
                    true
                }
                RunEvent::Ignored => false,
            }
        }
        Msg::Reset => {
            component.poll_epoch += 1;
            component.running = false;
            component.run = None;
            component.progress = 0.0;
            component.message = None;
            component.log.clear();
            component.error = None;
            true
        }
        Msg::FetchKnownTemplates => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::get_json("/ml/templates")
                    .await
                    .and_then(api::decode::<MlTemplatesResponse>);
                link.send_message(Msg::KnownTemplates(result));
            });
            false
        }
        Msg::KnownTemplates(result) => match result {
            Ok(response) if response.success => {
                component.known_templates = response.templates;
                true
            }
            Ok(_) => false,
            Err(err) => {
                // The summary is informational; a missing backend is not an error here.
                warn!(format!("could not list the model templates: {}", err));
                false
            }
        },
    }
}

fn schedule_poll(ctx: &Context<TrainingComponent>, epoch: u32, task_id: String) {
    let link = ctx.link().clone();
    spawn_local(async move {
        TimeoutFuture::new(POLL_INTERVAL_MS).await;
        link.send_message(Msg::Poll { epoch, task_id });
    });
}

/// Persists the model info (exactly once per run, enforced by the reducer)
/// and leaves the workflow idle.
fn finish_success(component: &mut TrainingComponent, info: common::model::records::ModelInfo) {
    if let Err(err) = store().set_model_info(&info) {
        error!(format!("could not cache the model info: {}", err));
    }
    component.model_info = Some(info);
    component.running = false;
    component.progress = 100.0;
    show_toast("Training complete");
}

/// Stops the run and surfaces the message; the previously cached model info
/// is left untouched.
fn finish_failure(component: &mut TrainingComponent, message: String) {
    component.running = false;
    component.run = None;
    component.error = Some(message);
}

//! Training workflow: submits all stored templates plus hyperparameters to
//! the training endpoint and follows the run to completion, either from the
//! synchronous response or by polling the status endpoint.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::TrainingComponent;

use crate::storage::store;

impl Component for TrainingComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let mut component = TrainingComponent::new();
        component.model_info = store().model_info();
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::FetchKnownTemplates);
        }
    }
}

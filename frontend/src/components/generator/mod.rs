//! Form generation workflow: builds a data-entry form for a stored
//! template, collects typed values, and submits them for PDF generation.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::GeneratorComponent;

use crate::storage::store;

impl Component for GeneratorComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let mut component = GeneratorComponent::new();
        component.templates = store().get_all();
        component.recent = store().recent_generations();
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

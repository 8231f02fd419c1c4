//! Template designer: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and messages.
//!
//! On first render the designer loads the saved-template list, then opens a
//! template when one is named by the `template_id` prop or the
//! `?template=<id>` URL query; otherwise it starts with an empty canvas.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DesignerProps;
pub use state::DesignerComponent;

use crate::helpers::template_id_from_url;
use crate::storage::store;

impl Component for DesignerComponent {
    type Message = Msg;
    type Properties = DesignerProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let mut component = DesignerComponent::new();
        component.saved_templates = store().get_all();
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let requested = ctx
                .props()
                .template_id
                .clone()
                .or_else(template_id_from_url);
            if let Some(id) = requested {
                ctx.link().send_message(Msg::LoadTemplate(id));
            }
        }
    }
}

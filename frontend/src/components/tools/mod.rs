//! Upload/result workflow, shared by the four PDF tools (detect, extract,
//! auto-generate, AI import). The component is parameterized by `ToolKind`;
//! everything else — input acquisition, MIME gating, one-in-flight
//! submission, error taxonomy — is identical across tools.

use yew::prelude::*;

mod messages;
mod props;
mod render;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{ToolKind, UploadToolProps};
pub use state::UploadTool;

impl Component for UploadTool {
    type Message = Msg;
    type Properties = UploadToolProps;

    fn create(_ctx: &Context<Self>) -> Self {
        UploadTool::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

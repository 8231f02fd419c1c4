//! Top-level application shell: page navigation and the API base URL
//! setting. Each page is a self-contained component constructed when the
//! page is entered and dropped when the user navigates away, so no workflow
//! state leaks across pages.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::designer::DesignerComponent;
use crate::components::generator::GeneratorComponent;
use crate::components::tools::{ToolKind, UploadTool};
use crate::components::training::TrainingComponent;
use crate::helpers::show_toast;
use crate::storage::store;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Designer,
    Tools,
    Generate,
    Train,
}

impl Page {
    fn title(&self) -> &'static str {
        match self {
            Page::Designer => "Designer",
            Page::Tools => "PDF Tools",
            Page::Generate => "Generate",
            Page::Train => "Training",
        }
    }

    fn all() -> [Page; 4] {
        [Page::Designer, Page::Tools, Page::Generate, Page::Train]
    }
}

pub enum Msg {
    SetPage(Page),
    SetApiBase(String),
}

pub struct App {
    page: Page,
    api_base: String,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::Designer,
            api_base: store().api_base(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetPage(page) => {
                self.page = page;
                true
            }
            Msg::SetApiBase(base) => {
                if base.trim().is_empty() {
                    return false;
                }
                match store().set_api_base(base.trim()) {
                    Ok(()) => {
                        self.api_base = store().api_base();
                        show_toast("API base URL updated");
                    }
                    Err(err) => show_toast(&format!("Could not save the API URL: {}", err)),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="app-root">
                <header class="app-header">
                    <h1>{"PDF Template Studio"}</h1>
                    <nav class="nav-bar">
                        {
                            for Page::all().into_iter().map(|page| {
                                let active = if page == self.page { "active" } else { "" };
                                html! {
                                    <button
                                        class={classes!("nav-btn", active)}
                                        onclick={link.callback(move |_| Msg::SetPage(page))}
                                    >
                                        { page.title() }
                                    </button>
                                }
                            })
                        }
                    </nav>
                    <div class="api-base">
                        <label>{"Backend"}</label>
                        <input
                            value={self.api_base.clone()}
                            onchange={link.callback(|e: Event| {
                                let input = e.target_unchecked_into::<HtmlInputElement>();
                                Msg::SetApiBase(input.value())
                            })}
                        />
                    </div>
                </header>

                <main class="app-main">
                    { self.page_view() }
                </main>
            </div>
        }
    }
}

impl App {
    fn page_view(&self) -> Html {
        match self.page {
            Page::Designer => html! { <DesignerComponent /> },
            Page::Tools => html! {
                <div class="tools-grid">
                    <UploadTool kind={ToolKind::Detect} />
                    <UploadTool kind={ToolKind::Extract} />
                    <UploadTool kind={ToolKind::AutoGenerate} />
                    <UploadTool kind={ToolKind::ImportAi} />
                </div>
            },
            Page::Generate => html! { <GeneratorComponent /> },
            Page::Train => html! { <TrainingComponent /> },
        }
    }
}

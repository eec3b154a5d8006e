mod api;
mod components;

use components::panel::Panel;
use components::prescription::PrescriptionTask;
use components::risk::RiskTask;
use components::sidebar::Sidebar;
use components::xray::XrayTask;
use sehat_shared::Page;
use yew::prelude::*;

enum Msg {
    Navigate(Page),
}

struct Model {
    page: Page,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                if page == self.page {
                    return false;
                }
                log::info!("Switching to {}", page);
                self.page = page;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_select = ctx.link().callback(Msg::Navigate);

        // Switching pages unmounts the previous panel along with its state.
        let panel = match self.page {
            Page::XRay => html! { <Panel<XrayTask> /> },
            Page::Ocr => html! { <Panel<PrescriptionTask> /> },
            Page::Risk => html! { <Panel<RiskTask> /> },
        };

        html! {
            <div class="app-shell">
                <Sidebar active={self.page} {on_select} />
                <main class="content">
                    { panel }
                </main>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}

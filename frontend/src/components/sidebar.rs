use sehat_shared::Page;
use strum::IntoEnumIterator;
use yew::prelude::*;

fn page_icon(page: Page) -> &'static str {
    match page {
        Page::XRay => "fa-solid fa-x-ray",
        Page::Ocr => "fa-solid fa-file-prescription",
        Page::Risk => "fa-solid fa-heart-pulse",
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub active: Page,
    pub on_select: Callback<Page>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let nav_item = |page: Page| {
        let onclick = props.on_select.reform(move |_: MouseEvent| page);
        html! {
            <button
                class={classes!("nav-item", (page == props.active).then_some("active"))}
                {onclick}
            >
                <i class={page_icon(page)}></i>
                <span>{ page.to_string() }</span>
            </button>
        }
    };

    html! {
        <aside class="sidebar">
            <div class="brand">
                <div class="brand-icon"><i class="fa-solid fa-stethoscope"></i></div>
                <h1>{"Sehat"}<span class="brand-accent">{"AI"}</span></h1>
            </div>
            <nav class="nav">
                { for Page::iter().map(nav_item) }
            </nav>
            <div class="sidebar-footer">
                <p>{"\u{00a9} 2024 SehatAI. All rights reserved."}</p>
                <p>{"Empowering Rural Healthcare."}</p>
            </div>
        </aside>
    }
}

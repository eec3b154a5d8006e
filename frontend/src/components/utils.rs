use yew::prelude::*;

pub fn render_error_message(message: &str) -> Html {
    html! {
        <div class="error-message">
            <i class="fa-solid fa-circle-exclamation"></i>
            <p>{ message }</p>
        </div>
    }
}

pub fn render_spinner() -> Html {
    html! { <i class="fa-solid fa-spinner fa-spin"></i> }
}

pub fn render_field_label(text: &str) -> Html {
    html! { <label class="field-label">{ text }</label> }
}

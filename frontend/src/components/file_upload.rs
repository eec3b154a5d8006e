use super::utils::render_error_message;
use gloo_file::{File as GlooFile, ObjectUrl};
use sehat_shared::encoding::{accept_attribute, is_accepted, unsupported_type_message};
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

/// An uploaded image plus the object URL used to preview it.
#[derive(Clone)]
pub struct SelectedImage {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
}

impl SelectedImage {
    pub fn new(file: GlooFile) -> Self {
        let preview_url = ObjectUrl::from(file.clone());
        Self { file, preview_url }
    }
}

#[derive(Properties, PartialEq)]
pub struct FileUploadProps {
    pub on_select: Callback<GlooFile>,
}

#[function_component(FileUpload)]
pub fn file_upload(props: &FileUploadProps) -> Html {
    let is_dragging = use_state(|| false);
    let file_name = use_state(String::new);
    let rejection = use_state(|| None::<String>);
    let input_ref = use_node_ref();

    // A rejected file leaves the current selection in place.
    let select = {
        let file_name = file_name.clone();
        let rejection = rejection.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |file: web_sys::File| {
            let mime_type = file.type_();
            if !is_accepted(&mime_type) {
                log::warn!("Rejected unsupported file: {} ({})", file.name(), mime_type);
                rejection.set(Some(unsupported_type_message(&mime_type)));
                return;
            }
            rejection.set(None);
            file_name.set(file.name());
            on_select.emit(GlooFile::from(file));
        })
    };

    let handle_change = {
        let select = select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.item(0)) {
                select.emit(file);
            }
            input.set_value("");
        })
    };

    let handle_drag_over = {
        let is_dragging = is_dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            is_dragging.set(true);
        })
    };

    let handle_drag_leave = {
        let is_dragging = is_dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            is_dragging.set(false);
        })
    };

    let handle_drop = {
        let is_dragging = is_dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            is_dragging.set(false);
            if let Some(file) = e
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.item(0))
            {
                select.emit(file);
            }
        })
    };

    let trigger_file_input = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    html! {
        <div
            class={classes!("upload-area", (*is_dragging).then_some("drag-over"))}
            ondragover={handle_drag_over}
            ondragleave={handle_drag_leave}
            ondrop={handle_drop}
        >
            <input
                ref={input_ref}
                type="file"
                accept={accept_attribute()}
                style="display: none;"
                onchange={handle_change}
            />
            <i class="fa-solid fa-cloud-arrow-up"></i>
            <p>
                <span class="upload-link" onclick={trigger_file_input}>{"Click to upload"}</span>
                {" or drag and drop"}
            </p>
            <p class="file-types">{"PNG, JPG, WEBP"}</p>
            if !file_name.is_empty() {
                <p class="file-name">{ (*file_name).clone() }</p>
            }
            if let Some(message) = &*rejection {
                { render_error_message(message) }
            }
        </div>
    }
}

/// Upload control followed by a preview of the current selection.
pub fn render_image_input(
    selected: &Option<SelectedImage>,
    on_change: Callback<Option<SelectedImage>>,
    preview_alt: &'static str,
) -> Html {
    let on_select = on_change.reform(|file: GlooFile| Some(SelectedImage::new(file)));

    html! {
        <>
            <FileUpload {on_select} />
            if let Some(image) = selected {
                <div class="image-preview">
                    <p class="field-label">{"Image Preview:"}</p>
                    <img src={image.preview_url.to_string()} alt={preview_alt} />
                </div>
            }
        </>
    }
}

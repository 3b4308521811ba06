//! 画像アップローダーコンポーネント

use leptos::html;
use leptos::prelude::*;
use photo_studio_common::upload::{is_image_mime, ACCEPT, SIZE_HINT_TEXT};
use photo_studio_common::EncodedImage;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement};

#[component]
pub fn ImageUploader<F>(on_upload: F) -> impl IntoView
where
    F: Fn(EncodedImage) + 'static + Clone,
{
    let (is_dragging, set_is_dragging) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let on_drop = {
        let on_upload = on_upload.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragging.set(false);
            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files, on_upload.clone());
            }
        }
    };

    let on_change = {
        let on_upload = on_upload.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(files) = input.files() {
                handle_files(files, on_upload.clone());
            }
            // 同じファイルを再選択できるように
            input.set_value("");
        }
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || if is_dragging.get() { "upload-area dragging" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_is_dragging.set(true);
            }
            on:dragleave=move |_: DragEvent| set_is_dragging.set(false)
            on:click=on_click
        >
            <input
                node_ref=input_ref
                type="file"
                accept=ACCEPT
                class="hidden"
                on:change=on_change
            />
            <div class="upload-icon">{move || if is_dragging.get() { "⬆" } else { "🖼" }}</div>
            <p class="upload-headline">
                {move || if is_dragging.get() { "Drop your image here" } else { "Drop an image or click to upload" }}
            </p>
            <p class="text-muted">{SIZE_HINT_TEXT}</p>
        </div>
    }
}

/// 先頭ファイルのみ。画像以外は無視
fn handle_files<F>(files: FileList, on_upload: F)
where
    F: Fn(EncodedImage) + 'static,
{
    let Some(file) = files.get(0) else {
        return;
    };
    if !is_image_mime(&file.type_()) {
        gloo::console::debug!("ignored non-image file", file.name());
        return;
    }
    if let Err(err) = read_file(file, on_upload) {
        gloo::console::warn!("could not read file", err);
    }
}

fn read_file<F>(file: File, on_upload: F) -> Result<(), JsValue>
where
    F: Fn(EncodedImage) + 'static,
{
    let reader = FileReader::new()?;
    let name = file.name();

    let result_reader = reader.clone();
    let onload = Closure::once(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = result_reader.result().ok().and_then(|r| r.as_string()) else {
            return;
        };
        match EncodedImage::from_data_url(&data_url) {
            Ok(image) => on_upload(image),
            Err(err) => gloo::console::warn!("could not read", name, err.to_string()),
        }
    });

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    reader.read_as_data_url(&file)
}

//! メインアプリケーションコンポーネント
//!
//! セッションはシグナル1つで持ち、更新はすべて `Session` の遷移関数を通す。

use gloo::timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use photo_studio_common::{
    download_file_name, DisabledBackend, EncodedImage, FilterType, Session, TransformBackend,
    TransformOutcome, PROCESSING_FLASH_MS,
};

use crate::canvas::download_canvas;
use crate::components::{
    header::Header, image_preview::ImagePreview, image_uploader::ImageUploader,
    prompt_input::PromptInput, transformation_panel::TransformationPanel,
};

/// フィルタ選択。画像がなければ何もしない
fn select_filter(session: &Session, filter: FilterType) -> Option<Session> {
    session
        .is_editing()
        .then(|| session.set_processing(true).select_filter(filter))
}

/// 変換結果の反映。元画像は保持する
fn apply_outcome(session: &Session, outcome: TransformOutcome) -> Session {
    match outcome {
        TransformOutcome::Completed(image) => Session {
            image: Some(image),
            ..session.clone()
        },
        TransformOutcome::Pending | TransformOutcome::Unavailable => session.clone(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (session, set_session) = signal(Session::new());
    let canvas_ref: NodeRef<html::Canvas> = NodeRef::new();
    let backend = DisabledBackend;

    let on_upload = move |image: EncodedImage| {
        set_session.update(|s| *s = s.upload(image));
    };

    let on_select = move |filter: FilterType| {
        let Some(next) = session.with_untracked(|s| select_filter(s, filter)) else {
            return;
        };
        set_session.set(next);
        Timeout::new(PROCESSING_FLASH_MS as u32, move || {
            set_session.update(|s| *s = s.set_processing(false));
        })
        .forget();
    };

    let on_prompt = move |prompt: String| {
        set_session.update(|s| *s = s.set_prompt(prompt.as_str()));
        match backend.submit(&prompt) {
            Ok(outcome) => set_session.update(|s| *s = apply_outcome(s, outcome)),
            Err(err) => gloo::console::warn!("transform failed", err.to_string()),
        }
    };

    let on_reset = move |_| set_session.update(|s| *s = s.reset());
    let on_clear = move |_| set_session.update(|s| *s = s.clear());

    let on_download = move |_| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let file_name = download_file_name(js_sys::Date::now() as i64);
        if let Err(err) = download_canvas(&canvas, &file_name) {
            gloo::console::warn!("download failed", err);
        }
    };

    // 画像は処理中フラグの切り替えでは変わらないので Memo で止める
    let image = Memo::new(move |_| session.with(|s| s.image.clone()));
    let original = Memo::new(move |_| session.with(|s| s.original_image.clone()));
    let active_filter = Memo::new(move |_| session.with(|s| s.active_filter));
    let processing = Memo::new(move |_| session.with(|s| s.is_processing));

    view! {
        <div class="container">
            <Header />

            <Show
                when=move || session.with(Session::is_editing)
                fallback=move || view! { <ImageUploader on_upload=on_upload /> }
            >
                <div class="toolbar">
                    <button class="btn" on:click=on_clear>"Upload New"</button>
                    <div class="toolbar-right">
                        <button
                            class="btn"
                            disabled=move || !session.with(Session::can_reset)
                            on:click=on_reset
                        >
                            "⟲ Reset"
                        </button>
                        <button class="btn primary" on:click=on_download>"⬇ Download"</button>
                    </div>
                </div>

                <div class="editor">
                    <ImagePreview
                        image=image
                        original=original
                        filter=active_filter
                        processing=processing
                        canvas_ref=canvas_ref
                    />
                    <aside class="sidebar">
                        <PromptInput
                            disabled=!backend.is_enabled()
                            processing=processing
                            on_submit=on_prompt
                        />
                        <TransformationPanel active=active_filter on_select=on_select />
                    </aside>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> EncodedImage {
        EncodedImage::new("image/png", b"png bytes".to_vec())
    }

    #[test]
    fn test_select_filter_requires_image() {
        assert!(select_filter(&Session::new(), FilterType::Sepia).is_none());

        let editing = Session::new().upload(photo());
        let next = select_filter(&editing, FilterType::Sepia).unwrap();
        assert_eq!(next.active_filter, FilterType::Sepia);
        assert!(next.is_processing);
    }

    #[test]
    fn test_apply_outcome_keeps_original() {
        let session = Session::new().upload(photo()).set_prompt("Make it look vintage");
        let result = EncodedImage::new("image/png", b"transformed".to_vec());

        let next = apply_outcome(&session, TransformOutcome::Completed(result.clone()));
        assert_eq!(next.image, Some(result));
        assert_eq!(next.original_image, Some(photo()));

        let unchanged = apply_outcome(&session, TransformOutcome::Unavailable);
        assert_eq!(unchanged, session);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_download_name_uses_js_clock() {
        let name = download_file_name(js_sys::Date::now() as i64);
        assert!(name.starts_with("edited-photo-"));
        assert!(name.ends_with(".png"));
    }
}

//! 画像プレビューコンポーネント
//!
//! 画像は変わった時だけ読み込み、フィルタの変更は読み込み済み画像から同期的に再描画する。
//! 押している間だけ元画像を重ねて比較できる。

use leptos::html;
use leptos::prelude::*;
use photo_studio_common::{filter_style, CompareToggle, EncodedImage, FilterType, PointerEvent};
use web_sys::HtmlImageElement;

use crate::canvas::{draw_filtered, load_image, LoadGeneration};

#[component]
pub fn ImagePreview(
    #[prop(into)] image: Signal<Option<EncodedImage>>,
    #[prop(into)] original: Signal<Option<EncodedImage>>,
    #[prop(into)] filter: Signal<FilterType>,
    #[prop(into)] processing: Signal<bool>,
    canvas_ref: NodeRef<html::Canvas>,
) -> impl IntoView {
    let (compare, set_compare) = signal(CompareToggle::default());

    let image_url = Memo::new(move |_| image.with(|i| i.as_ref().map(EncodedImage::to_data_url)));
    let original_url = Memo::new(move |_| original.with(|i| i.as_ref().map(EncodedImage::to_data_url)));

    let (loaded, set_loaded) = signal_local(None::<HtmlImageElement>);
    let generation = StoredValue::new(LoadGeneration::default());

    Effect::new(move |_| {
        set_loaded.set(None);
        let Some(url) = image_url.get() else {
            return;
        };
        let Some(ticket) = generation.try_update_value(LoadGeneration::next) else {
            return;
        };
        let result = load_image(&url, move |element| {
            if generation.try_with_value(|g| g.is_current(ticket)) == Some(true) {
                let _ = set_loaded.try_set(Some(element));
            }
        });
        if let Err(err) = result {
            gloo::console::warn!("image load failed", err);
        }
    });

    Effect::new(move |_| {
        let style = filter_style(filter.get());
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        loaded.with(|element| {
            let Some(element) = element else {
                return;
            };
            if let Err(err) = draw_filtered(&canvas, element, style) {
                gloo::console::warn!("preview redraw failed", err);
            }
        });
    });

    // フィルタなしでは比較しない
    let compare_available = move || !filter.get().is_identity();
    Effect::new(move |_| {
        if !compare_available() {
            set_compare.update(CompareToggle::release);
        }
    });

    let pointer = move |event: PointerEvent| {
        if compare_available() {
            set_compare.update(|c| c.handle(event));
        }
    };
    let showing_original = move || compare.with(CompareToggle::is_showing_original);

    view! {
        <div class="image-preview">
            <div class="preview-frame">
                <canvas
                    node_ref=canvas_ref
                    class=move || if processing.get() { "preview-canvas processing" } else { "preview-canvas" }
                ></canvas>
                <Show when=showing_original>
                    <img class="preview-original" src=move || original_url.get().unwrap_or_default() alt="Original" />
                </Show>
                <Show when=move || processing.get()>
                    <div class="spinner"></div>
                </Show>
            </div>
            <Show when=compare_available>
                <button
                    class="compare-btn"
                    on:mousedown=move |_| pointer(PointerEvent::MouseDown)
                    on:mouseup=move |_| pointer(PointerEvent::MouseUp)
                    on:mouseleave=move |_| pointer(PointerEvent::MouseLeave)
                    on:touchstart=move |_| pointer(PointerEvent::TouchStart)
                    on:touchend=move |_| pointer(PointerEvent::TouchEnd)
                >
                    {move || if showing_original() { "🙈 " } else { "👁 " }}
                    {move || compare.with(|c| c.label())}
                </button>
            </Show>
            <div class="badge">{move || filter.get().badge_label()}</div>
        </div>
    }
}

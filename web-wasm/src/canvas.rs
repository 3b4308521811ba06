//! ブラウザのcanvasによる描画とダウンロード
//!
//! フィルタはcanvas 2Dコンテキストの `filter` にCSSフィルタ文字列をそのまま渡す。

use photo_studio_common::export::DOWNLOAD_MIME;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// 画像読み込みの世代
///
/// 新しい読み込みを始めるたびに進め、古い読み込みの完了通知を捨てる。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// 画像要素を作って読み込む。完了時に `on_loaded` を呼ぶ
pub fn load_image<F>(src: &str, on_loaded: F) -> Result<(), JsValue>
where
    F: FnOnce(HtmlImageElement) + 'static,
{
    let image = HtmlImageElement::new()?;
    let loaded = image.clone();
    let onload = Closure::once(move || on_loaded(loaded));
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    image.set_src(src);
    Ok(())
}

/// 読み込み済み画像を元の解像度でフィルタ付き描画する（同期）
pub fn draw_filtered(
    canvas: &HtmlCanvasElement,
    image: &HtmlImageElement,
    filter: &str,
) -> Result<(), JsValue> {
    canvas.set_width(image.natural_width());
    canvas.set_height(image.natural_height());
    let ctx = context_2d(canvas)?;
    ctx.set_filter(filter);
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)
}

/// canvasの内容をPNGとして保存させる
pub fn download_canvas(canvas: &HtmlCanvasElement, file_name: &str) -> Result<(), JsValue> {
    let url = canvas.to_data_url_with_type(DOWNLOAD_MIME)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_draw_sets_filter_synchronously() {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
        let image = HtmlImageElement::new_with_width_and_height(2, 2).unwrap();

        let _ = draw_filtered(&canvas, &image, "sepia(100%)");
        assert_eq!(context_2d(&canvas).unwrap().filter(), "sepia(100%)");
    }
}

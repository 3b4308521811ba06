//! 画像プレビュー
//!
//! 描画面はセッションから導出される状態で、(画像, フィルタ) が変わった時だけ
//! 再描画する。比較トグルはビュー側の一時状態でありセッションには含めない。

use crate::error::Result;
use crate::filter::FilterType;
use crate::image_data::EncodedImage;
use crate::render::RenderSurface;
use image::DynamicImage;

/// 比較ボタンへのポインタ/タッチ入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    MouseDown,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchEnd,
}

/// 押している間だけ元画像を重ねる
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareToggle {
    pressed: bool,
}

impl CompareToggle {
    pub fn handle(&mut self, event: PointerEvent) {
        self.pressed = matches!(event, PointerEvent::MouseDown | PointerEvent::TouchStart);
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn is_showing_original(&self) -> bool {
        self.pressed
    }

    pub fn label(&self) -> &'static str {
        if self.pressed {
            "Showing Original"
        } else {
            "Hold to Compare"
        }
    }
}

struct LoadedSource {
    encoded: EncodedImage,
    decoded: DynamicImage,
}

/// プレビュー: 描画面と比較トグルを所有する
#[derive(Default)]
pub struct ImagePreview {
    source: Option<LoadedSource>,
    filter: FilterType,
    surface: Option<RenderSurface>,
    compare: CompareToggle,
}

impl ImagePreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像とフィルタを反映。再描画した場合は true
    ///
    /// 画像のデコードに失敗した場合は描画面を持たない状態のままエラーを返す。
    pub fn sync(&mut self, image: Option<&EncodedImage>, filter: FilterType) -> Result<bool> {
        let Some(image) = image else {
            let had_surface = self.surface.is_some();
            self.source = None;
            self.surface = None;
            self.filter = FilterType::None;
            self.compare.release();
            return Ok(had_surface);
        };

        let same_image = self
            .source
            .as_ref()
            .is_some_and(|s| &s.encoded == image);
        if same_image && self.filter == filter && self.surface.is_some() {
            return Ok(false);
        }

        if !same_image {
            self.source = None;
            self.surface = None;
            let decoded = image.decode()?;
            self.source = Some(LoadedSource {
                encoded: image.clone(),
                decoded,
            });
        }

        if let Some(source) = &self.source {
            self.surface = Some(RenderSurface::draw(&source.decoded, filter.style())?);
        }
        self.filter = filter;
        if !self.compare_available() {
            self.compare.release();
        }
        Ok(true)
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// 比較対象の元画像（デコード済み）
    pub fn source(&self) -> Option<&DynamicImage> {
        self.source.as_ref().map(|s| &s.decoded)
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// 比較ボタンはフィルタ適用中のみ表示
    pub fn compare_available(&self) -> bool {
        self.surface.is_some() && !self.filter.is_identity()
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        if self.compare_available() {
            self.compare.handle(event);
        } else {
            self.compare.release();
        }
    }

    pub fn is_showing_original(&self) -> bool {
        self.compare.is_showing_original()
    }

    pub fn compare_label(&self) -> &'static str {
        self.compare.label()
    }

    pub fn badge(&self) -> String {
        self.filter.badge_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_style;
    use crate::image_data::tests::png_bytes;

    fn photo() -> EncodedImage {
        EncodedImage::new("image/png", png_bytes(5, 4))
    }

    #[test]
    fn test_compare_toggle_mouse_path() {
        let mut toggle = CompareToggle::default();
        assert!(!toggle.is_showing_original());
        toggle.handle(PointerEvent::MouseDown);
        assert!(toggle.is_showing_original());
        assert_eq!(toggle.label(), "Showing Original");
        toggle.handle(PointerEvent::MouseUp);
        assert!(!toggle.is_showing_original());

        toggle.handle(PointerEvent::MouseDown);
        toggle.handle(PointerEvent::MouseLeave);
        assert!(!toggle.is_showing_original());
        assert_eq!(toggle.label(), "Hold to Compare");
    }

    #[test]
    fn test_compare_toggle_touch_path() {
        let mut toggle = CompareToggle::default();
        toggle.handle(PointerEvent::TouchStart);
        assert!(toggle.is_showing_original());
        toggle.handle(PointerEvent::TouchEnd);
        assert!(!toggle.is_showing_original());
    }

    #[test]
    fn test_sync_draws_at_natural_size() {
        let mut preview = ImagePreview::new();
        assert!(preview.sync(Some(&photo()), FilterType::Sepia).unwrap());
        let surface = preview.surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (5, 4));
        assert_eq!(surface.filter(), filter_style(FilterType::Sepia));
    }

    #[test]
    fn test_sync_skips_unchanged_inputs() {
        let image = photo();
        let mut preview = ImagePreview::new();
        assert!(preview.sync(Some(&image), FilterType::Warm).unwrap());
        assert!(!preview.sync(Some(&image), FilterType::Warm).unwrap());
        assert!(preview.sync(Some(&image), FilterType::Cold).unwrap());
    }

    #[test]
    fn test_sync_none_drops_surface() {
        let mut preview = ImagePreview::new();
        preview.sync(Some(&photo()), FilterType::Blur).unwrap();
        assert!(preview.sync(None, FilterType::None).unwrap());
        assert!(preview.surface().is_none());
        assert!(preview.source().is_none());
    }

    #[test]
    fn test_compare_only_with_active_filter() {
        let image = photo();
        let mut preview = ImagePreview::new();
        preview.sync(Some(&image), FilterType::None).unwrap();
        preview.pointer(PointerEvent::MouseDown);
        assert!(!preview.is_showing_original());

        preview.sync(Some(&image), FilterType::Invert).unwrap();
        preview.pointer(PointerEvent::MouseDown);
        assert!(preview.is_showing_original());

        // フィルタを外すと押下状態も解除
        preview.sync(Some(&image), FilterType::None).unwrap();
        assert!(!preview.is_showing_original());
    }

    #[test]
    fn test_corrupt_image_leaves_no_surface() {
        let broken = EncodedImage::new("image/png", b"garbage".to_vec());
        let mut preview = ImagePreview::new();
        assert!(preview.sync(Some(&broken), FilterType::Sepia).is_err());
        assert!(preview.surface().is_none());
    }
}

use std::time::{Duration, Instant};

use image::RgbaImage;
use photo_studio_common::{EncodedImage, PROCESSING_FLASH_MS};

/// フィルタ選択時の処理中表示（100ms で自動解除、見た目のみ）
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessingFlash {
    until: Option<Instant>,
}

impl ProcessingFlash {
    pub fn start(&mut self, now: Instant) {
        self.until = Some(now + Duration::from_millis(PROCESSING_FLASH_MS));
    }

    pub fn is_active(&self) -> bool {
        self.until.is_some()
    }

    /// 期限切れなら解除して true
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.until {
            Some(until) if now >= until => {
                self.until = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.until.map(|until| until.saturating_duration_since(now))
    }
}

/// RGBAバッファを egui の画像に変換
pub fn color_image(pixels: &RgbaImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [pixels.width() as usize, pixels.height() as usize],
        pixels.as_raw(),
    )
}

/// プレビュー用テクスチャ
///
/// 比較用テクスチャはセッションの元画像から作る。元画像が変わった時だけ作り直す。
#[derive(Default)]
pub struct PreviewTextures {
    pub filtered: Option<egui::TextureHandle>,
    pub original: Option<egui::TextureHandle>,
    original_source: Option<EncodedImage>,
    pub dirty: bool,
}

impl PreviewTextures {
    /// 元画像が前回と異なれば記録して true
    pub fn original_changed(&mut self, original: Option<&EncodedImage>) -> bool {
        if self.original_source.as_ref() == original {
            return false;
        }
        self.original_source = original.cloned();
        true
    }

    pub fn clear(&mut self) {
        self.filtered = None;
        self.original = None;
        self.original_source = None;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_expires_after_100ms() {
        let start = Instant::now();
        let mut flash = ProcessingFlash::default();
        assert!(!flash.is_active());

        flash.start(start);
        assert!(flash.is_active());
        assert!(!flash.expire(start + Duration::from_millis(50)));
        assert!(flash.expire(start + Duration::from_millis(100)));
        assert!(!flash.is_active());
        assert!(!flash.expire(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_original_changed_only_on_new_original() {
        let first = EncodedImage::new("image/png", b"first".to_vec());
        let transformed = EncodedImage::new("image/png", b"transformed".to_vec());
        let mut textures = PreviewTextures::default();

        assert!(!textures.original_changed(None));
        assert!(textures.original_changed(Some(&first)));
        assert!(!textures.original_changed(Some(&first)));
        assert!(textures.original_changed(Some(&transformed)));

        textures.clear();
        assert!(textures.original_changed(Some(&transformed)));
    }

    #[test]
    fn test_color_image_keeps_size_and_pixels() {
        let pixels = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let color = color_image(&pixels);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels.len(), 6);
        assert_eq!(color.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut flash = ProcessingFlash::default();
        assert_eq!(flash.remaining(start), None);
        flash.start(start);
        assert_eq!(flash.remaining(start), Some(Duration::from_millis(100)));
    }
}

//! 画像アップローダ
//!
//! ドラッグ&ドロップまたはファイル選択で受け取ったファイルを
//! `image/*` に限定して呼び出し元のコールバックへ渡す。

use serde::{Deserialize, Serialize};

/// 表示上の上限（実際には検証しない）
pub const MAX_SIZE_HINT_BYTES: u64 = 10 * 1024 * 1024;

pub const SIZE_HINT_TEXT: &str = "Supports JPG, PNG, WebP up to 10MB";

/// ファイル選択ダイアログの accept 属性
pub const ACCEPT: &str = "image/*";

const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
];

/// アップロードされた生ファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// ディスク上のファイルを読み込む（MIMEは拡張子から判定、不明なら application/octet-stream）
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> crate::error::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = mime_from_name(&name).unwrap_or("application/octet-stream");
        Ok(Self::new(name, mime, bytes))
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// ファイル名の拡張子からMIMEタイプを推定
pub fn mime_from_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    MIME_BY_EXTENSION
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// アップロード面
///
/// `dragging` は見た目だけの一時状態。
pub struct ImageUploader<F>
where
    F: FnMut(UploadFile),
{
    on_upload: F,
    dragging: bool,
}

impl<F> ImageUploader<F>
where
    F: FnMut(UploadFile),
{
    pub fn new(on_upload: F) -> Self {
        Self {
            on_upload,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// ドロップ: 先頭ファイルのみ対象。画像以外は黙って無視
    pub fn drop_files(&mut self, files: Vec<UploadFile>) -> bool {
        self.dragging = false;
        match files.into_iter().next() {
            Some(file) if file.is_image() => {
                (self.on_upload)(file);
                true
            }
            Some(file) => {
                log::debug!("ignored non-image drop: {} ({})", file.name, file.mime);
                false
            }
            None => false,
        }
    }

    /// ファイル選択
    pub fn select(&mut self, file: Option<UploadFile>) -> bool {
        match file {
            Some(file) if file.is_image() => {
                (self.on_upload)(file);
                true
            }
            _ => false,
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.dragging {
            "Drop your image here"
        } else {
            "Drop an image or click to upload"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn jpg(name: &str) -> UploadFile {
        UploadFile::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    #[test]
    fn test_mime_from_name() {
        assert_eq!(mime_from_name("photo.jpg"), Some("image/jpeg"));
        assert_eq!(mime_from_name("PHOTO.JPEG"), Some("image/jpeg"));
        assert_eq!(mime_from_name("a.b.webp"), Some("image/webp"));
        assert_eq!(mime_from_name("notes.txt"), None);
        assert_eq!(mime_from_name("noext"), None);
    }

    #[test]
    fn test_drop_image_invokes_callback_once() {
        let received = RefCell::new(Vec::new());
        let mut uploader = ImageUploader::new(|f: UploadFile| received.borrow_mut().push(f.name));
        uploader.drag_over();
        assert!(uploader.is_dragging());

        assert!(uploader.drop_files(vec![jpg("photo.jpg"), jpg("second.jpg")]));
        assert!(!uploader.is_dragging());
        drop(uploader);
        assert_eq!(received.into_inner(), vec!["photo.jpg".to_string()]);
    }

    #[test]
    fn test_drop_text_is_ignored() {
        let mut calls = 0;
        let mut uploader = ImageUploader::new(|_| calls += 1);
        let txt = UploadFile::new("notes.txt", "text/plain", b"hi".to_vec());
        assert!(!uploader.drop_files(vec![txt]));
        assert!(!uploader.drop_files(Vec::new()));
        drop(uploader);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_select() {
        let mut calls = 0;
        let mut uploader = ImageUploader::new(|_| calls += 1);
        assert!(uploader.select(Some(jpg("a.jpg"))));
        assert!(!uploader.select(None));
        drop(uploader);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_headline_follows_drag_state() {
        let mut uploader = ImageUploader::new(|_| {});
        assert_eq!(uploader.headline(), "Drop an image or click to upload");
        uploader.drag_over();
        assert_eq!(uploader.headline(), "Drop your image here");
        uploader.drag_leave();
        assert!(!uploader.is_dragging());
    }

    #[test]
    fn test_size_hint_not_enforced() {
        let mut calls = 0;
        let big = UploadFile::new(
            "huge.png",
            "image/png",
            vec![0u8; (MAX_SIZE_HINT_BYTES + 1) as usize],
        );
        let mut uploader = ImageUploader::new(|_| calls += 1);
        assert!(uploader.drop_files(vec![big]));
        drop(uploader);
        assert_eq!(calls, 1);
    }
}

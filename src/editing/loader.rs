//! 画像ファイルの非同期読み込み
//!
//! 読み込みとデコード確認はブロッキング処理なのでワーカースレッドで行う。
//! キャンセルもリトライもしない一発の読み込み。

use crate::error::{StudioError, Result};
use photo_studio_common::{EncodedImage, UploadFile};
use std::path::Path;

pub async fn read_image_file(path: &Path) -> Result<EncodedImage> {
    if !path.is_file() {
        return Err(StudioError::FileNotFound(path.display().to_string()));
    }

    let owned = path.to_path_buf();
    let image = tokio::task::spawn_blocking(move || -> photo_studio_common::Result<EncodedImage> {
        let file = UploadFile::from_path(&owned)?;
        EncodedImage::read(&file)
    })
    .await??;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = read_image_file(Path::new("/nonexistent/photo.jpg")).await;
        assert!(matches!(result, Err(StudioError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_read_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        DynamicImage::ImageRgb8(RgbImage::new(3, 3)).save(&path).unwrap();

        let image = read_image_file(&path).await.unwrap();
        assert_eq!(image.mime(), "image/png");
    }

    #[tokio::test]
    async fn test_read_text_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let result = read_image_file(&path).await;
        assert!(matches!(
            result,
            Err(StudioError::Common(photo_studio_common::Error::UnsupportedMime(_)))
        ));
    }
}

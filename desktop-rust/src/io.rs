use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use photo_studio_common::upload::mime_from_name;
use photo_studio_common::{Download, EncodedImage, UploadFile};

/// ワーカースレッドからの読み込み結果
pub enum LoadMessage {
    Loaded { name: String, image: EncodedImage },
    Failed { name: String, error: String },
}

pub const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

/// ドロップされたファイルを UploadFile に変換（バイト列がなければパスから読む）
pub fn upload_from_dropped(file: &egui::DroppedFile) -> Option<UploadFile> {
    let name = if file.name.is_empty() {
        file.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    } else {
        file.name.clone()
    };
    let mime = if file.mime.is_empty() {
        mime_from_name(&name).unwrap_or("application/octet-stream").to_string()
    } else {
        file.mime.clone()
    };
    let bytes = match (&file.bytes, &file.path) {
        (Some(bytes), _) => bytes.to_vec(),
        (None, Some(path)) => fs::read(path).ok()?,
        (None, None) => return None,
    };
    Some(UploadFile::new(name, mime, bytes))
}

pub fn pick_image() -> Option<UploadFile> {
    let path = rfd::FileDialog::new()
        .add_filter("Image", PICKER_EXTENSIONS)
        .pick_file()?;
    match UploadFile::from_path(&path) {
        Ok(file) => Some(file),
        Err(err) => {
            log::warn!("read {} failed: {err}", path.display());
            None
        }
    }
}

/// 読み込みとデコード確認をワーカースレッドで実行する
pub fn spawn_load(file: UploadFile, sender: Sender<LoadMessage>) {
    std::thread::spawn(move || {
        let message = match EncodedImage::read(&file) {
            Ok(image) => LoadMessage::Loaded { name: file.name, image },
            Err(err) => LoadMessage::Failed {
                name: file.name,
                error: err.to_string(),
            },
        };
        let _ = sender.send(message);
    });
}

pub fn write_download(path: &Path, download: &Download) -> Result<()> {
    fs::write(path, &download.bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// 保存ダイアログ（既定名は edited-photo-<ms>.png）
pub fn pick_download_path(download: &Download) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(download.file_name.as_str())
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::mpsc;

    #[test]
    fn test_upload_from_dropped_bytes() {
        let dropped = egui::DroppedFile {
            name: "photo.png".to_string(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            ..Default::default()
        };
        let file = upload_from_dropped(&dropped).unwrap();
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_upload_from_dropped_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        let dropped = egui::DroppedFile {
            path: Some(path),
            ..Default::default()
        };
        let file = upload_from_dropped(&dropped).unwrap();
        assert_eq!(file.name, "notes.txt");
        assert!(!file.is_image());
    }

    #[test]
    fn test_spawn_load_reports_failure() {
        let (tx, rx) = mpsc::channel();
        spawn_load(UploadFile::new("x.png", "image/png", b"nope".to_vec()), tx);
        match rx.recv().unwrap() {
            LoadMessage::Failed { name, .. } => assert_eq!(name, "x.png"),
            LoadMessage::Loaded { .. } => panic!("corrupt image should fail"),
        }
    }

    #[test]
    fn test_write_download() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download {
            file_name: "edited-photo-1.png".to_string(),
            bytes: vec![9, 9],
        };
        let path = dir.path().join(&download.file_name);
        write_download(&path, &download).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![9, 9]);
    }
}

//! ダウンロード出力
//!
//! 描画面のピクセルバッファを PNG にして `edited-photo-<unix-ms>.png` として渡す。

use crate::error::Result;
use crate::render::RenderSurface;

pub const DOWNLOAD_PREFIX: &str = "edited-photo-";
pub const DOWNLOAD_MIME: &str = "image/png";

/// ダウンロードファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn download_file_name(timestamp_ms: i64) -> String {
    format!("{}{}.png", DOWNLOAD_PREFIX, timestamp_ms)
}

/// 描画面がなければ何もしない
pub fn export_surface(surface: Option<&RenderSurface>, timestamp_ms: i64) -> Result<Option<Download>> {
    let Some(surface) = surface else {
        log::debug!("download skipped: no surface");
        return Ok(None);
    };
    let bytes = surface.to_png()?;
    Ok(Some(Download {
        file_name: download_file_name(timestamp_ms),
        bytes,
    }))
}

/// ディスクへ保存（非WASM環境のみ）
#[cfg(not(target_arch = "wasm32"))]
pub fn save_download(download: &Download, dir: &std::path::Path) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&download.file_name);
    std::fs::write(&path, &download.bytes)?;
    Ok(path)
}

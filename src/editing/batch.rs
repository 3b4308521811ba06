//! フォルダ一括フィルタ適用

use crate::error::{StudioError, Result};
use crate::scanner::{self, ImageInfo};
use indicatif::{ProgressBar, ProgressStyle};
use photo_studio_common::{EncodedImage, FilterType, RenderSurface, UploadFile};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 1ファイル分の結果
#[derive(Debug)]
pub struct BatchItem {
    pub source: PathBuf,
    pub output: std::result::Result<PathBuf, String>,
}

/// 出力ファイル名: `<元ファイル名>-<フィルタID>.png`
pub fn output_name(file_name: &str, filter: FilterType) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    format!("{}-{}.png", stem, filter.id())
}

fn process_one(image: &ImageInfo, filter: FilterType, output_dir: &Path) -> photo_studio_common::Result<PathBuf> {
    let file = UploadFile::from_path(&image.path)?;
    let encoded = EncodedImage::read(&file)?;
    let surface = RenderSurface::draw(&encoded.decode()?, filter.style())?;
    let path = output_dir.join(output_name(&image.file_name, filter));
    std::fs::write(&path, surface.to_png()?)?;
    Ok(path)
}

pub fn run_batch(folder: &Path, filter: FilterType, output_dir: &Path) -> Result<Vec<BatchItem>> {
    let images = scanner::scan_folder(folder)?;
    if images.is_empty() {
        return Err(StudioError::NoImagesFound(folder.display().to_string()));
    }
    std::fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let results: Vec<BatchItem> = images
        .par_iter()
        .map(|image| {
            let output = process_one(image, filter, output_dir).map_err(|e| {
                log::warn!("{}: {}", image.file_name, e);
                e.to_string()
            });
            pb.inc(1);
            BatchItem {
                source: image.path.clone(),
                output,
            }
        })
        .collect();

    pb.finish_and_clear();
    Ok(results)
}

//! CLIからの編集セッション実行

pub mod batch;
mod loader;

pub use loader::read_image_file;

use crate::cli::EditStep;
use crate::error::{StudioError, Result};
use photo_studio_common::export::save_download;
use photo_studio_common::{
    download_file_name, Download, FilterType, PhotoEditor, Session, TransformOutcome,
};
use std::path::{Path, PathBuf};

/// 編集結果
#[derive(Debug)]
pub struct EditReport {
    pub session: Session,
    pub downloads: Vec<PathBuf>,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 同一ミリ秒の連続ダウンロードで上書きしないようタイムスタンプをずらす
fn unique_download(mut download: Download, dir: &Path, mut timestamp_ms: i64) -> Download {
    while dir.join(&download.file_name).exists() {
        timestamp_ms += 1;
        download.file_name = download_file_name(timestamp_ms);
    }
    download
}

fn save_current(editor: &PhotoEditor, output_dir: &Path) -> Result<Option<PathBuf>> {
    let ts = now_millis();
    let Some(download) = editor.download(ts) else {
        log::info!("画像がないためダウンロードをスキップ");
        return Ok(None);
    };
    let download = unique_download(download, output_dir, ts);
    let path = save_download(&download, output_dir)?;
    Ok(Some(path))
}

/// 1枚読み込み → フィルタ → ダウンロード
pub async fn run_apply(image: &Path, filter: FilterType, output_dir: &Path) -> Result<PathBuf> {
    let encoded = read_image_file(image).await?;

    let mut editor = PhotoEditor::new();
    editor.commit_upload(encoded);
    editor.select_filter(filter);
    editor.finish_processing();

    save_current(&editor, output_dir)?
        .ok_or_else(|| StudioError::UnreadableImage(image.display().to_string()))
}

/// ステップを順に実行する
///
/// 読み込みに失敗した `upload:` ステップは状態を変えずに続行する。
pub async fn run_edit(image: &Path, steps: &[EditStep], output_dir: &Path) -> Result<EditReport> {
    let mut editor = PhotoEditor::new();
    let encoded = read_image_file(image).await?;
    editor.commit_upload(encoded);

    let mut downloads = Vec::new();

    for step in steps {
        log::debug!("step: {}", step);
        match step {
            EditStep::Filter(filter) => {
                editor.select_filter(*filter);
                editor.finish_processing();
            }
            EditStep::Reset => editor.reset(),
            EditStep::Clear => editor.clear(),
            EditStep::Download => {
                if let Some(path) = save_current(&editor, output_dir)? {
                    println!("  ✔ 保存: {}", path.display());
                    downloads.push(path);
                }
            }
            EditStep::Prompt(text) => {
                if editor.prompt().is_disabled() {
                    println!("  - AI変換は現在利用できません: {}", text);
                    continue;
                }
                match editor.submit_prompt(text)? {
                    TransformOutcome::Completed(_) => println!("  ✔ AI変換を適用"),
                    TransformOutcome::Pending => println!("  - AI変換を受け付けました"),
                    TransformOutcome::Unavailable => println!("  - AI変換は現在利用できません"),
                }
            }
            EditStep::Upload(path) => match read_image_file(path).await {
                Ok(encoded) => editor.commit_upload(encoded),
                Err(e) => log::warn!("読み込み失敗 {}: {}", path.display(), e),
            },
        }
    }

    Ok(EditReport {
        session: editor.session().clone(),
        downloads,
    })
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像として読み込めません: {0}")]
    UnreadableImage(String),

    #[error("不正な編集ステップ: {0} (フィルタID / reset / clear / download / prompt:<text> / upload:<path>)")]
    InvalidStep(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("非同期タスクエラー: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Common(#[from] photo_studio_common::Error),
}

pub type Result<T> = std::result::Result<T, StudioError>;

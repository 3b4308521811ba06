use crate::error::StudioError;
use clap::{Parser, Subcommand};
use photo_studio_common::FilterType;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "photo-studio")]
#[command(about = "写真にプリセットフィルタを適用してPNGで書き出すツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像にフィルタを適用してダウンロード
    Apply {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// フィルタ (none/grayscale/sepia/vintage/warm/cold/high-contrast/blur/invert)
        #[arg(short, long)]
        filter: Option<FilterType>,

        /// 出力ディレクトリ（デフォルト: 設定値またはカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 編集ステップを順に実行（例: sepia reset grayscale download）
    Edit {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// ステップ: フィルタID / reset / clear / download / prompt:<text> / upload:<path>
        #[arg(required = true, num_args = 1..)]
        steps: Vec<EditStep>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 最終セッションをJSONで出力
        #[arg(long)]
        dump_session: Option<PathBuf>,
    },

    /// フォルダ内の全画像に同じフィルタを適用
    Batch {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// フィルタ
        #[arg(short, long, required = true)]
        filter: FilterType,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ/edited）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// フィルタ一覧を表示
    Filters,

    /// AI変換プロンプトを送信（現在は無効）
    Prompt {
        /// 変換内容
        #[arg(required = true)]
        text: String,
    },

    /// 設定を表示/編集
    Config {
        /// 出力ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 既定フィルタを設定
        #[arg(long)]
        set_default_filter: Option<FilterType>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `edit` サブコマンドの1ステップ
#[derive(Clone, Debug, PartialEq)]
pub enum EditStep {
    Filter(FilterType),
    Reset,
    Clear,
    Download,
    Prompt(String),
    Upload(PathBuf),
}

impl FromStr for EditStep {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix("prompt:") {
            return Ok(EditStep::Prompt(text.to_string()));
        }
        if let Some(path) = s.strip_prefix("upload:") {
            return Ok(EditStep::Upload(PathBuf::from(path)));
        }
        match s.to_lowercase().as_str() {
            "reset" => Ok(EditStep::Reset),
            "clear" => Ok(EditStep::Clear),
            "download" | "save" => Ok(EditStep::Download),
            other => other
                .parse::<FilterType>()
                .map(EditStep::Filter)
                .map_err(|_| StudioError::InvalidStep(s.to_string())),
        }
    }
}

impl std::fmt::Display for EditStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditStep::Filter(filter) => write!(f, "{}", filter),
            EditStep::Reset => write!(f, "reset"),
            EditStep::Clear => write!(f, "clear"),
            EditStep::Download => write!(f, "download"),
            EditStep::Prompt(text) => write!(f, "prompt:{}", text),
            EditStep::Upload(path) => write!(f, "upload:{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!("sepia".parse::<EditStep>().unwrap(), EditStep::Filter(FilterType::Sepia));
        assert_eq!("RESET".parse::<EditStep>().unwrap(), EditStep::Reset);
        assert_eq!("save".parse::<EditStep>().unwrap(), EditStep::Download);
        assert_eq!(
            "prompt:Add dramatic lighting".parse::<EditStep>().unwrap(),
            EditStep::Prompt("Add dramatic lighting".to_string())
        );
        assert_eq!(
            "upload:other.png".parse::<EditStep>().unwrap(),
            EditStep::Upload(PathBuf::from("other.png"))
        );
        assert!("sharpen".parse::<EditStep>().is_err());
    }

    #[test]
    fn test_unknown_step_is_invalid_step() {
        let err = "sharpen".parse::<EditStep>().unwrap_err();
        assert!(matches!(err, StudioError::InvalidStep(ref step) if step == "sharpen"));
        assert!(err.to_string().starts_with("不正な編集ステップ: sharpen"));
    }

    #[test]
    fn test_cli_rejects_unknown_step() {
        let result = Cli::try_parse_from(["photo-studio", "edit", "a.jpg", "sepia", "sharpen"]);
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("不正な編集ステップ: sharpen"));
    }

    #[test]
    fn test_cli_parses_apply() {
        let cli = Cli::try_parse_from(["photo-studio", "apply", "a.jpg", "-f", "high-contrast"]).unwrap();
        match cli.command {
            Commands::Apply { image, filter, output } => {
                assert_eq!(image, PathBuf::from("a.jpg"));
                assert_eq!(filter, Some(FilterType::HighContrast));
                assert!(output.is_none());
            }
            _ => panic!("apply expected"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["photo-studio", "apply", "a.jpg", "-f", "sharpen"]).is_err());
    }
}

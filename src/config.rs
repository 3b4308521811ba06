use crate::error::{StudioError, Result};
use photo_studio_common::FilterType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const OUTPUT_DIR_ENV: &str = "PHOTO_STUDIO_OUTPUT_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// ダウンロード先（未設定ならカレント）
    pub output_dir: Option<PathBuf>,
    /// `apply` で --filter 省略時に使うフィルタ
    pub default_filter: FilterType,
    /// AI変換パネルの有効化（現状バックエンドなし）
    pub prompt_enabled: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StudioError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-studio").join("config.json"))
    }

    /// 出力先（環境変数を優先）
    pub fn output_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }

        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.output_dir = Some(dir);
        self.save()
    }
}

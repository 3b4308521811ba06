//! 編集セッション
//!
//! 1回の編集操作の全状態。遷移はすべて新しい値を返す純関数。

use crate::filter::FilterType;
use crate::image_data::EncodedImage;
use serde::{Deserialize, Serialize};

/// セッションのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 画像なし
    Empty,
    /// 画像あり
    Editing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub image: Option<EncodedImage>,
    pub original_image: Option<EncodedImage>,
    pub active_filter: FilterType,
    pub is_processing: bool,
    pub ai_prompt: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.image.is_some() {
            Phase::Editing
        } else {
            Phase::Empty
        }
    }

    pub fn is_editing(&self) -> bool {
        self.phase() == Phase::Editing
    }

    /// 読み込み完了: 現在画像と元画像を同じ値にし、フィルタとプロンプトを初期化
    pub fn upload(&self, image: EncodedImage) -> Self {
        Self {
            image: Some(image.clone()),
            original_image: Some(image),
            active_filter: FilterType::None,
            is_processing: self.is_processing,
            ai_prompt: None,
        }
    }

    pub fn select_filter(&self, filter: FilterType) -> Self {
        Self {
            active_filter: filter,
            ..self.clone()
        }
    }

    /// 元画像に戻す（Editingのまま）
    pub fn reset(&self) -> Self {
        Self {
            image: self.original_image.clone(),
            original_image: self.original_image.clone(),
            active_filter: FilterType::None,
            is_processing: self.is_processing,
            ai_prompt: None,
        }
    }

    /// Emptyに戻す
    pub fn clear(&self) -> Self {
        Self {
            is_processing: self.is_processing,
            ..Self::default()
        }
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            ai_prompt: Some(prompt.into()),
            ..self.clone()
        }
    }

    pub fn set_processing(&self, processing: bool) -> Self {
        Self {
            is_processing: processing,
            ..self.clone()
        }
    }

    /// リセットボタンの有効判定
    pub fn can_reset(&self) -> bool {
        !self.active_filter.is_identity() || self.ai_prompt.is_some()
    }
}

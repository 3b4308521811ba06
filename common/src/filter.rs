//! フィルタ種別とスタイルマッピング
//!
//! フィルタIDからフィルタ式（`sepia(50%) contrast(90%)` 形式）への変換。
//! ブラウザでは canvas の `filter` にそのまま渡し、
//! ネイティブでは [`crate::expression`] で解析してピクセルに適用する。

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 恒等フィルタ式
pub const IDENTITY_EXPRESSION: &str = "none";

/// プリセットフィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    #[default]
    None,
    Grayscale,
    Sepia,
    Vintage,
    Warm,
    Cold,
    HighContrast,
    Blur,
    Invert,
}

impl FilterType {
    /// 全フィルタ（パネル表示順）
    pub const ALL: [FilterType; 9] = [
        FilterType::None,
        FilterType::Grayscale,
        FilterType::Sepia,
        FilterType::Vintage,
        FilterType::Warm,
        FilterType::Cold,
        FilterType::HighContrast,
        FilterType::Blur,
        FilterType::Invert,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Grayscale => "grayscale",
            FilterType::Sepia => "sepia",
            FilterType::Vintage => "vintage",
            FilterType::Warm => "warm",
            FilterType::Cold => "cold",
            FilterType::HighContrast => "high-contrast",
            FilterType::Blur => "blur",
            FilterType::Invert => "invert",
        }
    }

    /// フィルタ式を取得
    pub fn style(&self) -> &'static str {
        filter_style(*self)
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, FilterType::None)
    }

    /// プレビュー下部のバッジ表示
    ///
    /// 先頭を大文字にし、最初の `-` だけを空白に置換する
    /// （`high-contrast` → `High contrast Filter Applied`）。
    pub fn badge_label(&self) -> String {
        if self.is_identity() {
            return "Original Photo".to_string();
        }
        let id = self.id();
        let mut chars = id.chars();
        let head = chars
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default();
        let tail = chars.as_str().replacen('-', " ", 1);
        format!("{}{} Filter Applied", head, tail)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        FilterType::ALL
            .iter()
            .copied()
            .find(|f| f.id() == id)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

/// フィルタ → フィルタ式
pub fn filter_style(filter: FilterType) -> &'static str {
    match filter {
        FilterType::None => IDENTITY_EXPRESSION,
        FilterType::Grayscale => "grayscale(100%)",
        FilterType::Sepia => "sepia(100%)",
        FilterType::Vintage => "sepia(50%) contrast(90%) brightness(90%)",
        FilterType::Warm => "sepia(30%) saturate(140%) brightness(105%)",
        FilterType::Cold => "saturate(80%) brightness(105%) hue-rotate(10deg)",
        FilterType::HighContrast => "contrast(150%) saturate(110%)",
        FilterType::Blur => "blur(3px)",
        FilterType::Invert => "invert(100%)",
    }
}

/// フィルタID文字列 → フィルタ式
///
/// 未知のID（旧 `sharpen` を含む）は恒等式にフォールバックする。
pub fn filter_style_for_id(id: &str) -> &'static str {
    id.parse::<FilterType>()
        .map(filter_style)
        .unwrap_or(IDENTITY_EXPRESSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_filter_has_non_empty_style() {
        for filter in FilterType::ALL {
            let style = filter_style(filter);
            assert!(!style.is_empty(), "{} のフィルタ式が空", filter);
            assert_eq!(style, filter_style(filter));
        }
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(filter_style(FilterType::None), "none");
        assert!(FilterType::default().is_identity());
    }

    #[test]
    fn test_only_none_maps_to_identity() {
        let identities = FilterType::ALL
            .iter()
            .filter(|f| f.style() == IDENTITY_EXPRESSION)
            .count();
        assert_eq!(identities, 1);
    }

    #[test]
    fn test_style_for_unknown_id_falls_back() {
        assert_eq!(filter_style_for_id("sharpen"), "none");
        assert_eq!(filter_style_for_id(""), "none");
        assert_eq!(filter_style_for_id("sepia"), "sepia(100%)");
        assert_eq!(filter_style_for_id("HIGH-CONTRAST"), "contrast(150%) saturate(110%)");
    }

    #[test]
    fn test_parse_roundtrip_ids() {
        for filter in FilterType::ALL {
            assert_eq!(filter.id().parse::<FilterType>().unwrap(), filter);
        }
        assert!(matches!("sharpen".parse::<FilterType>(), Err(Error::UnknownFilter(_))));
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(FilterType::None.badge_label(), "Original Photo");
        assert_eq!(FilterType::Sepia.badge_label(), "Sepia Filter Applied");
        assert_eq!(FilterType::HighContrast.badge_label(), "High contrast Filter Applied");
    }

    #[test]
    fn test_serde_uses_kebab_ids() {
        let json = serde_json::to_string(&FilterType::HighContrast).unwrap();
        assert_eq!(json, "\"high-contrast\"");
        let back: FilterType = serde_json::from_str("\"vintage\"").unwrap();
        assert_eq!(back, FilterType::Vintage);
    }
}

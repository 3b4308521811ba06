//! クイックフィルタパネル
//!
//! 固定のフィルタ一覧と選択イベントの発行のみを行う。

use crate::filter::FilterType;

/// 処理中インジケータを表示する時間（見た目だけで実処理はない）
pub const PROCESSING_FLASH_MS: u64 = 100;

pub const PANEL_TITLE: &str = "Quick Filters";
pub const PANEL_SUBTITLE: &str = "Instant canvas-based effects";

/// パネル上のフィルタボタン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterEntry {
    pub filter: FilterType,
    pub name: &'static str,
    /// アイコン（絵文字）
    pub icon: &'static str,
}

pub const FILTER_CATALOG: [FilterEntry; 9] = [
    FilterEntry { filter: FilterType::None, name: "Original", icon: "⊙" },
    FilterEntry { filter: FilterType::Grayscale, name: "Grayscale", icon: "🌙" },
    FilterEntry { filter: FilterType::Sepia, name: "Sepia", icon: "🎨" },
    FilterEntry { filter: FilterType::Vintage, name: "Vintage", icon: "✨" },
    FilterEntry { filter: FilterType::Warm, name: "Warm", icon: "☀" },
    FilterEntry { filter: FilterType::Cold, name: "Cold", icon: "❄" },
    FilterEntry { filter: FilterType::HighContrast, name: "Contrast", icon: "◐" },
    FilterEntry { filter: FilterType::Blur, name: "Blur", icon: "◎" },
    FilterEntry { filter: FilterType::Invert, name: "Invert", icon: "⇋" },
];

pub fn catalog_entry(filter: FilterType) -> &'static FilterEntry {
    FILTER_CATALOG
        .iter()
        .find(|e| e.filter == filter)
        .unwrap_or(&FILTER_CATALOG[0])
}

/// パネルから発行されるイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// 処理中表示の開始とフィルタ選択
    Selected(FilterType),
}

/// パネル: 表示状態の計算とクリックのディスパッチ
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformationPanel {
    active: FilterType,
}

impl TransformationPanel {
    pub fn new(active: FilterType) -> Self {
        Self { active }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static FilterEntry, bool)> + '_ {
        FILTER_CATALOG.iter().map(move |e| (e, e.filter == self.active))
    }

    pub fn click(&self, filter: FilterType) -> PanelEvent {
        PanelEvent::Selected(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_filter_once() {
        for filter in FilterType::ALL {
            let count = FILTER_CATALOG.iter().filter(|e| e.filter == filter).count();
            assert_eq!(count, 1, "{} の登録数が不正", filter);
        }
        assert_eq!(FILTER_CATALOG.len(), FilterType::ALL.len());
    }

    #[test]
    fn test_catalog_order() {
        let ids: Vec<&str> = FILTER_CATALOG.iter().map(|e| e.filter.id()).collect();
        assert_eq!(
            ids,
            vec!["none", "grayscale", "sepia", "vintage", "warm", "cold", "high-contrast", "blur", "invert"]
        );
    }

    #[test]
    fn test_exactly_one_active_entry() {
        let panel = TransformationPanel::new(FilterType::Cold);
        let active: Vec<_> = panel.entries().filter(|(_, on)| *on).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0.name, "Cold");
    }

    #[test]
    fn test_click_dispatches() {
        let panel = TransformationPanel::default();
        assert_eq!(panel.click(FilterType::Blur), PanelEvent::Selected(FilterType::Blur));
    }

    #[test]
    fn test_catalog_entry_lookup() {
        assert_eq!(catalog_entry(FilterType::HighContrast).name, "Contrast");
        assert_eq!(catalog_entry(FilterType::None).name, "Original");
    }
}

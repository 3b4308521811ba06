//! AI変換プロンプト入力
//!
//! 生成系バックエンドが未接続のため常に無効化されて表示されるが、
//! 入力の契約（Enter送信・候補クリック送信・無効時/処理中は送信しない）は保持する。
//! バックエンドは [`TransformBackend`] で差し替える。

use crate::error::Result;
use crate::image_data::EncodedImage;

pub const PANEL_TITLE: &str = "AI Transform";
pub const PLACEHOLDER: &str = "Describe how you want to transform your image...";

/// 候補プロンプト
pub const SUGGESTIONS: [&str; 8] = [
    "Make it look like a painting",
    "Turn into a pencil sketch",
    "Add a sunset atmosphere",
    "Make it look vintage",
    "Convert to anime style",
    "Add dramatic lighting",
    "Make it look like winter",
    "Turn into watercolor art",
];

/// 変換リクエストの結果
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    /// 受け付け済み、結果待ち
    Pending,
    /// 変換済み画像
    Completed(EncodedImage),
    /// バックエンド未接続
    Unavailable,
}

/// 画像変換バックエンド
pub trait TransformBackend {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn submit(&self, prompt: &str) -> Result<TransformOutcome>;
}

/// 未接続バックエンド。何もしない
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledBackend;

impl TransformBackend for DisabledBackend {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn submit(&self, prompt: &str) -> Result<TransformOutcome> {
        log::debug!("transform backend disabled, ignoring prompt: {}", prompt);
        Ok(TransformOutcome::Unavailable)
    }
}

/// プロンプト入力欄
#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    text: String,
    disabled: bool,
}

impl PromptInput {
    pub fn new(disabled: bool) -> Self {
        Self {
            text: String::new(),
            disabled,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// 入力欄・候補ボタンが操作可能か
    pub fn is_interactive(&self, processing: bool) -> bool {
        !self.disabled && !processing
    }

    /// 送信ボタンが押せるか
    pub fn can_send(&self, processing: bool) -> bool {
        self.is_interactive(processing) && !self.text.trim().is_empty()
    }

    /// 送信: 前後の空白を除いたテキスト
    pub fn submit(&self, processing: bool) -> Option<String> {
        self.can_send(processing)
            .then(|| self.text.trim().to_string())
    }

    /// Enter（Shiftなし）で送信。Shift+Enter は改行扱い
    pub fn key_down(&self, key: &str, shift: bool, processing: bool) -> Option<String> {
        if is_submit_key(key, shift) {
            self.submit(processing)
        } else {
            None
        }
    }

    /// 候補クリック: 入力欄へ反映し、送信可能ならそのまま送信
    pub fn click_suggestion(&mut self, suggestion: &str, processing: bool) -> Option<String> {
        self.text = suggestion.to_string();
        self.is_interactive(processing)
            .then(|| suggestion.to_string())
    }
}

/// 送信キーか。送信できない状態でも改行入力は抑止する
pub fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_key_ignores_state() {
        assert!(is_submit_key("Enter", false));
        assert!(!is_submit_key("Enter", true));
        assert!(!is_submit_key("a", false));

        // 無効時は送信しないが、Enter は送信キーのまま（改行を入れない）
        let input = PromptInput::new(true);
        assert_eq!(input.key_down("Enter", false, false), None);
    }

    #[test]
    fn test_enter_submits_trimmed() {
        let mut input = PromptInput::new(false);
        input.set_text("  Add a sunset atmosphere \n");
        assert_eq!(
            input.key_down("Enter", false, false),
            Some("Add a sunset atmosphere".to_string())
        );
    }

    #[test]
    fn test_shift_enter_does_not_submit() {
        let mut input = PromptInput::new(false);
        input.set_text("hello");
        assert_eq!(input.key_down("Enter", true, false), None);
        assert_eq!(input.key_down("a", false, false), None);
    }

    #[test]
    fn test_blank_text_not_submitted() {
        let mut input = PromptInput::new(false);
        input.set_text("   ");
        assert_eq!(input.submit(false), None);
        assert!(!input.can_send(false));
    }

    #[test]
    fn test_no_submit_while_processing_or_disabled() {
        let mut input = PromptInput::new(false);
        input.set_text("Make it look like winter");
        assert_eq!(input.submit(true), None);

        input.set_disabled(true);
        assert_eq!(input.submit(false), None);
        assert_eq!(input.key_down("Enter", false, false), None);
    }

    #[test]
    fn test_suggestion_click() {
        let mut input = PromptInput::new(false);
        assert_eq!(
            input.click_suggestion(SUGGESTIONS[1], false),
            Some("Turn into a pencil sketch".to_string())
        );
        assert_eq!(input.text(), "Turn into a pencil sketch");

        assert_eq!(input.click_suggestion(SUGGESTIONS[0], true), None);
        assert_eq!(input.text(), SUGGESTIONS[0]);
    }

    #[test]
    fn test_disabled_suggestion_fills_but_does_not_submit() {
        let mut input = PromptInput::new(true);
        assert_eq!(input.click_suggestion(SUGGESTIONS[7], false), None);
        assert_eq!(input.text(), "Turn into watercolor art");
    }

    #[test]
    fn test_disabled_backend() {
        let backend = DisabledBackend;
        assert!(!backend.is_enabled());
        assert_eq!(backend.submit("anything").unwrap(), TransformOutcome::Unavailable);
    }
}

//! フォトエディタ（オーケストレータ）
//!
//! セッション状態を所有し、アップローダ・パネル・プレビュー・プロンプトを束ねる。
//! 失敗はすべてユーザーに見せずログに残すのみ。

use crate::error::Result;
use crate::export::{export_surface, Download};
use crate::filter::FilterType;
use crate::image_data::EncodedImage;
use crate::preview::{ImagePreview, PointerEvent};
use crate::prompt::{DisabledBackend, PromptInput, TransformBackend, TransformOutcome};
use crate::session::{Phase, Session};
use crate::upload::UploadFile;

pub struct PhotoEditor<B: TransformBackend = DisabledBackend> {
    session: Session,
    preview: ImagePreview,
    prompt: PromptInput,
    backend: B,
}

impl PhotoEditor<DisabledBackend> {
    pub fn new() -> Self {
        Self::with_backend(DisabledBackend)
    }
}

impl Default for PhotoEditor<DisabledBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TransformBackend> PhotoEditor<B> {
    /// バックエンドが無効ならプロンプト欄も無効
    pub fn with_backend(backend: B) -> Self {
        let prompt = PromptInput::new(!backend.is_enabled());
        Self {
            session: Session::new(),
            preview: ImagePreview::new(),
            prompt,
            backend,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn preview(&self) -> &ImagePreview {
        &self.preview
    }

    pub fn prompt(&self) -> &PromptInput {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut PromptInput {
        &mut self.prompt
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// ファイルを読み込んでセッションに反映。読めなければ状態は変えない
    pub fn upload(&mut self, file: UploadFile) -> bool {
        match EncodedImage::read(&file) {
            Ok(image) => {
                self.commit_upload(image);
                log::info!("loaded {}", file.name);
                true
            }
            Err(e) => {
                log::warn!("could not read {}: {}", file.name, e);
                false
            }
        }
    }

    /// 非同期に読み込んだ画像を確定する
    pub fn commit_upload(&mut self, image: EncodedImage) {
        self.apply(self.session.upload(image));
        self.prompt.set_text("");
    }

    /// フィルタ選択。処理中表示は [`Self::finish_processing`] で解除
    pub fn select_filter(&mut self, filter: FilterType) {
        if !self.session.is_editing() {
            return;
        }
        let next = self.session.set_processing(true).select_filter(filter);
        self.apply(next);
        log::debug!("filter -> {}", filter);
    }

    pub fn finish_processing(&mut self) {
        self.session = self.session.set_processing(false);
    }

    pub fn reset(&mut self) {
        if !self.session.is_editing() {
            return;
        }
        self.apply(self.session.reset());
        log::debug!("reset to original");
    }

    pub fn clear(&mut self) {
        self.apply(self.session.clear());
        self.prompt.set_text("");
        log::debug!("cleared");
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.preview.pointer(event);
    }

    /// 現在の描画面をPNGにする。描画面がなければ None
    pub fn download(&self, timestamp_ms: i64) -> Option<Download> {
        match export_surface(self.preview.surface(), timestamp_ms) {
            Ok(download) => download,
            Err(e) => {
                log::warn!("download failed: {}", e);
                None
            }
        }
    }

    /// プロンプトを記録してバックエンドへ送る
    pub fn submit_prompt(&mut self, prompt: &str) -> Result<TransformOutcome> {
        self.session = self.session.set_prompt(prompt);
        let outcome = self.backend.submit(prompt)?;
        if let TransformOutcome::Completed(image) = &outcome {
            let next = Session {
                image: Some(image.clone()),
                ..self.session.clone()
            };
            self.apply(next);
        }
        Ok(outcome)
    }

    fn apply(&mut self, next: Session) {
        self.session = next;
        if let Err(e) = self
            .preview
            .sync(self.session.image.as_ref(), self.session.active_filter)
        {
            log::warn!("preview redraw failed: {}", e);
        }
    }
}

use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use eframe::egui::{self, Color32, RichText};
use photo_studio_common::catalog::{PanelEvent, PANEL_SUBTITLE, PANEL_TITLE};
use photo_studio_common::prompt::{PANEL_TITLE as PROMPT_TITLE, PLACEHOLDER};
use photo_studio_common::upload::SIZE_HINT_TEXT;
use photo_studio_common::{
    ImageUploader, PhotoEditor, PointerEvent, TransformOutcome, TransformationPanel, UploadFile,
    SUGGESTIONS,
};

use crate::io::{
    pick_download_path, pick_image, spawn_load, upload_from_dropped, write_download, LoadMessage,
};
use crate::model::{color_image, PreviewTextures, ProcessingFlash};

type UploadCallback = Box<dyn FnMut(UploadFile)>;

pub struct StudioApp {
    editor: PhotoEditor,
    uploader: ImageUploader<UploadCallback>,
    load_rx: Receiver<LoadMessage>,
    textures: PreviewTextures,
    flash: ProcessingFlash,
    status: String,
}

impl StudioApp {
    pub fn new() -> Self {
        let (load_tx, load_rx) = mpsc::channel();
        let on_upload: UploadCallback = Box::new(move |file| spawn_load(file, load_tx.clone()));
        Self {
            editor: PhotoEditor::new(),
            uploader: ImageUploader::new(on_upload),
            load_rx,
            textures: PreviewTextures::default(),
            flash: ProcessingFlash::default(),
            status: String::new(),
        }
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.load_rx.try_recv() {
            match msg {
                LoadMessage::Loaded { name, image } => {
                    self.editor.commit_upload(image);
                    self.textures.dirty = true;
                    self.status = name;
                }
                // 読み込み失敗はユーザーには見せない
                LoadMessage::Failed { name, error } => {
                    log::warn!("could not read {name}: {error}");
                }
            }
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if hovering {
            self.uploader.drag_over();
        } else if self.uploader.is_dragging() {
            self.uploader.drag_leave();
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() || self.editor.session().is_editing() {
            return;
        }
        let files: Vec<UploadFile> = dropped.iter().filter_map(upload_from_dropped).collect();
        self.uploader.drop_files(files);
    }

    fn tick_processing(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.flash.expire(now) {
            self.editor.finish_processing();
        }
        if let Some(remaining) = self.flash.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn refresh_textures(&mut self, ctx: &egui::Context) {
        if !self.textures.dirty {
            return;
        }
        self.textures.dirty = false;

        self.textures.filtered = self.editor.preview().surface().map(|surface| {
            ctx.load_texture("surface", color_image(surface.pixels()), egui::TextureOptions::LINEAR)
        });

        let original = self.editor.session().original_image.as_ref();
        if self.textures.original_changed(original) {
            self.textures.original = original.and_then(|image| match image.decode() {
                Ok(decoded) => Some(ctx.load_texture(
                    "original",
                    color_image(&decoded.to_rgba8()),
                    egui::TextureOptions::LINEAR,
                )),
                Err(err) => {
                    log::warn!("original decode failed: {err}");
                    None
                }
            });
        }
    }

    fn select_filter(&mut self, event: PanelEvent) {
        let PanelEvent::Selected(filter) = event;
        self.editor.select_filter(filter);
        self.flash.start(Instant::now());
        self.textures.dirty = true;
    }

    fn reset(&mut self) {
        self.editor.reset();
        self.textures.dirty = true;
    }

    fn clear(&mut self) {
        self.editor.clear();
        self.textures.clear();
        self.status.clear();
    }

    fn download(&mut self) {
        let Some(download) = self.editor.download(chrono::Utc::now().timestamp_millis()) else {
            return;
        };
        let Some(path) = pick_download_path(&download) else {
            return;
        };
        match write_download(&path, &download) {
            Ok(()) => self.status = format!("Saved {}", path.display()),
            Err(err) => log::warn!("save failed: {err}"),
        }
    }

    fn submit_prompt(&mut self, prompt: String) {
        match self.editor.submit_prompt(&prompt) {
            Ok(TransformOutcome::Completed(_)) => self.textures.dirty = true,
            Ok(_) => {}
            Err(err) => log::warn!("transform failed: {err}"),
        }
    }

    fn render_uploader(&mut self, ui: &mut egui::Ui) {
        let dragging = self.uploader.is_dragging();
        let stroke_color = if dragging {
            Color32::from_rgb(246, 196, 69)
        } else {
            Color32::from_gray(80)
        };
        let frame = egui::Frame::none()
            .fill(if dragging { Color32::from_rgb(40, 36, 24) } else { Color32::from_rgb(24, 28, 40) })
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .rounding(egui::Rounding::same(16.0))
            .inner_margin(egui::Margin::same(48.0));

        let inner = frame.show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(if dragging { "⬆" } else { "🖼" }).size(48.0));
                ui.add_space(12.0);
                ui.label(RichText::new(self.uploader.headline()).size(20.0).strong());
                ui.label(RichText::new(SIZE_HINT_TEXT).color(Color32::from_gray(160)));
            });
        });

        let response = inner.response.interact(egui::Sense::click());
        if response.clicked() {
            if let Some(file) = pick_image() {
                self.uploader.select(Some(file));
            }
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Upload New").clicked() {
                self.clear();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⬇ Download").clicked() {
                    self.download();
                }
                let can_reset = self.editor.session().can_reset();
                if ui.add_enabled(can_reset, egui::Button::new("⟲ Reset")).clicked() {
                    self.reset();
                }
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        let processing = self.editor.session().is_processing;
        let showing_original = self.editor.preview().is_showing_original();
        let texture = if showing_original {
            self.textures.original.as_ref()
        } else {
            self.textures.filtered.as_ref()
        };

        let available = ui.available_size() - egui::vec2(0.0, 80.0);
        if let Some(texture) = texture {
            let size = fit_size(texture.size_vec2(), available);
            let tint = if processing { Color32::from_white_alpha(128) } else { Color32::WHITE };
            let response = ui.add(egui::Image::new(texture).fit_to_exact_size(size).tint(tint));
            if processing {
                ui.put(response.rect, egui::Spinner::new().size(32.0));
            }
        } else {
            ui.allocate_ui_with_layout(
                available,
                egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                |ui| {
                    ui.label("Loading...");
                },
            );
        }

        if self.editor.preview().compare_available() {
            let label = if showing_original {
                format!("🙈 {}", self.editor.preview().compare_label())
            } else {
                format!("👁 {}", self.editor.preview().compare_label())
            };
            let response = ui.button(label);
            let pressed = response.is_pointer_button_down_on();
            if pressed && !showing_original {
                self.editor.pointer(PointerEvent::MouseDown);
            } else if !pressed && showing_original {
                let event = if response.hovered() {
                    PointerEvent::MouseUp
                } else {
                    PointerEvent::MouseLeave
                };
                self.editor.pointer(event);
            }
        }

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(self.editor.preview().badge())
                    .color(Color32::from_gray(170))
                    .size(13.0),
            );
        });
    }

    fn render_prompt(&mut self, ui: &mut egui::Ui) {
        let processing = self.editor.session().is_processing;
        let interactive = self.editor.prompt().is_interactive(processing);
        let mut submitted = None;

        ui.label(RichText::new(format!("✨ {}", PROMPT_TITLE)).strong().size(16.0));

        // Shiftなしの Enter は改行させない（送信できなくても）
        let text_id = ui.make_persistent_id("prompt_text");
        let enter = ui.memory(|m| m.has_focus(text_id))
            && ui.ctx().input_mut(|i| take_submit_enter(&mut i.events));
        if enter {
            submitted = self.editor.prompt().key_down("Enter", false, processing);
        }

        let mut text = self.editor.prompt().text().to_string();
        let response = ui.add_enabled(
            interactive,
            egui::TextEdit::multiline(&mut text)
                .id(text_id)
                .hint_text(PLACEHOLDER)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.editor.prompt_mut().set_text(text);
        }

        let can_send = self.editor.prompt().can_send(processing);
        if ui.add_enabled(can_send, egui::Button::new("➤ Send")).clicked() {
            submitted = self.editor.prompt().submit(processing);
        }

        ui.label(RichText::new("Try these:").size(11.0).color(Color32::from_gray(160)));
        ui.horizontal_wrapped(|ui| {
            for suggestion in SUGGESTIONS {
                if ui
                    .add_enabled(interactive, egui::Button::new(suggestion).small())
                    .clicked()
                {
                    submitted = self.editor.prompt_mut().click_suggestion(suggestion, processing);
                }
            }
        });

        if let Some(prompt) = submitted {
            self.submit_prompt(prompt);
        }
    }

    fn render_filters(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(PANEL_TITLE).strong().size(16.0));
        ui.label(RichText::new(PANEL_SUBTITLE).size(11.0).color(Color32::from_gray(160)));
        ui.add_space(8.0);

        let panel = TransformationPanel::new(self.editor.session().active_filter);
        let mut event = None;
        egui::Grid::new("filter_grid").num_columns(3).spacing([8.0, 8.0]).show(ui, |ui| {
            for (i, (entry, active)) in panel.entries().enumerate() {
                let label = format!("{}\n{}", entry.icon, entry.name);
                let button = egui::SelectableLabel::new(active, RichText::new(label).size(12.0));
                if ui.add_sized([88.0, 56.0], button).clicked() {
                    event = Some(panel.click(entry.filter));
                }
                if i % 3 == 2 {
                    ui.end_row();
                }
            }
        });

        if let Some(event) = event {
            self.select_filter(event);
        }
    }
}

impl Default for StudioApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages();
        self.handle_file_drops(ctx);
        self.tick_processing(ctx);
        self.refresh_textures(ctx);
        if !self.editor.session().is_editing() {
            // ワーカースレッドの読み込み完了を拾う
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("Photo Studio").size(28.0).strong());
                ui.label(
                    RichText::new("Transform your photos with filters and AI")
                        .color(Color32::from_gray(170)),
                );
            });
            ui.add_space(6.0);
        });

        if !self.editor.session().is_editing() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.add_space(32.0);
                self.render_uploader(ui);
            });
            return;
        }

        egui::SidePanel::right("controls")
            .exact_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_prompt(ui);
                    ui.separator();
                    self.render_filters(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_toolbar(ui);
            ui.separator();
            self.render_preview(ui);
        });
    }
}

/// Shiftなしの Enter 押下をイベント列から取り除く。取り除いたら true
fn take_submit_enter(events: &mut Vec<egui::Event>) -> bool {
    let before = events.len();
    events.retain(|event| {
        !matches!(
            event,
            egui::Event::Key { key: egui::Key::Enter, pressed: true, modifiers, .. }
                if !modifiers.shift
        )
    });
    events.len() != before
}

/// アスペクト比を保って収まるサイズ
fn fit_size(image: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y).min(1.0).max(0.0);
    image * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_size_keeps_aspect() {
        let size = fit_size(egui::vec2(400.0, 200.0), egui::vec2(200.0, 200.0));
        assert_eq!(size, egui::vec2(200.0, 100.0));
    }

    fn key(key: egui::Key, shift: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers { shift, ..Default::default() },
        }
    }

    #[test]
    fn test_plain_enter_is_taken_before_text_edit() {
        let mut events = vec![key(egui::Key::A, false), key(egui::Key::Enter, false)];
        assert!(take_submit_enter(&mut events));
        assert_eq!(events, vec![key(egui::Key::A, false)]);
    }

    #[test]
    fn test_shift_enter_keeps_newline() {
        let mut events = vec![key(egui::Key::Enter, true)];
        assert!(!take_submit_enter(&mut events));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_fit_size_does_not_upscale() {
        let size = fit_size(egui::vec2(50.0, 40.0), egui::vec2(500.0, 500.0));
        assert_eq!(size, egui::vec2(50.0, 40.0));
    }
}

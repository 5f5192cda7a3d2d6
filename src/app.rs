//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::edit::EditorSession;
use crate::error::EditorError;
use egui::{Context, Key};
use egui_file_dialog::DialogState;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

mod clipboard;
mod editing;
mod export_actions;
mod image_loader;
mod image_state;
mod ui;
mod ui_state;

pub use image_state::{
    ImageLoadRequest, ImageLoadResult, ImageState, PendingImageMeta, PendingImageTask,
};
pub use ui_state::{NativeDialog, UiState};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const ATTENTION_BLINK_SPEED: f32 = 2.4;
const ATTENTION_ALPHA_MIN: f32 = 0.35;
const ATTENTION_ALPHA_MAX: f32 = 1.0;
const ATTENTION_OUTLINE_PAD: f32 = 2.0;

fn safe_usize_to_f32(value: usize) -> f32 {
    let clamped = value.min(u32::MAX as usize);
    let as_u32 = u32::try_from(clamped).unwrap_or(u32::MAX);
    #[allow(clippy::cast_precision_loss)]
    {
        as_u32 as f32
    }
}

fn rounded_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value.round().clamp(0.0, f32::from(u8::MAX)) as u8
    }
}

pub struct EditorApp {
    session: EditorSession,
    image: ImageState,
    ui: UiState,
    active_dialog: Option<NativeDialog>,
    last_image_dir: Option<PathBuf>,
    last_export_dir: Option<PathBuf>,
    config: AppConfig,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self {
            session: EditorSession::default(),
            image: ImageState::default(),
            ui: UiState::default(),
            active_dialog: None,
            last_image_dir: None,
            last_export_dir: None,
            config: AppConfig::load(),
        }
    }
}

impl EditorApp {
    /// Create a new app and optionally queue an initial image load.
    pub fn new_with_initial_path(_ctx: &Context, initial_path: Option<&Path>) -> Self {
        let mut app = Self::default();
        if let Some(p) = initial_path {
            app.start_loading_image_from_path(p.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.ui.last_status = Some(msg.into());
    }

    /// Log an error and show it in the status bar. Editing state is untouched.
    fn report_error(&mut self, context: &str, err: &EditorError) {
        if err.is_failure() {
            warn!("{context}: {err}");
            self.set_status(format!("{context}: {err}."));
        } else {
            info!("{context}: {err}");
            self.set_status(format!("{err}."));
        }
    }

    const fn has_image(&self) -> bool {
        self.image.source.is_some()
    }

    /// An image is decoded and no newer one is still loading.
    const fn is_image_ready(&self) -> bool {
        self.has_image() && self.image.pending.is_none()
    }

    fn handle_hotkeys(&mut self, ctx: &Context) {
        // Ignored while typing in text fields.
        if ctx.wants_keyboard_input() {
            return;
        }
        let no_dialog = self.active_dialog.is_none();
        // Ctrl/Cmd + O: open image
        if no_dialog && ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command) {
            self.open_image_dialog();
        }
        // Ctrl/Cmd + S: save edited image
        if no_dialog && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command) {
            self.start_export();
        }
        // Ctrl/Cmd + V: paste image from clipboard
        if no_dialog && ctx.input(|i| i.key_pressed(Key::V) && i.modifiers.command) {
            self.paste_image_from_clipboard();
        }
        // Ctrl/Cmd + I: show image info
        if self.has_image() && ctx.input(|i| i.key_pressed(Key::I) && i.modifiers.command) {
            self.ui.info_window_open = true;
        }
        // Ctrl/Cmd + B: toggle side panel
        if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
            self.ui.side_open = !self.ui.side_open;
        }
        // Ctrl/Cmd + Z: undo, Ctrl/Cmd + Shift + Z or Ctrl/Cmd + Y: redo
        let (undo, redo) = ctx.input(|i| {
            let z = i.key_pressed(Key::Z) && i.modifiers.command;
            let y = i.key_pressed(Key::Y) && i.modifiers.command;
            (z && !i.modifiers.shift, y || (z && i.modifiers.shift))
        });
        if undo {
            self.undo_edit();
        }
        if redo {
            self.redo_edit();
        }
    }

    fn update_dialogs(&mut self, ctx: &Context) {
        let mut close_dialog = false;
        let mut picked_open: Option<PathBuf> = None;
        let mut picked_save: Option<PathBuf> = None;
        let mut cancelled: Option<&'static str> = None;

        if let Some(dialog_state) = self.active_dialog.as_mut() {
            let (dialog, is_open) = match dialog_state {
                NativeDialog::Open(dialog) => (dialog, true),
                NativeDialog::SaveImage(dialog) => (dialog, false),
            };
            dialog.update(ctx);
            if let Some(path) = dialog.take_picked() {
                if is_open {
                    picked_open = Some(path);
                } else {
                    picked_save = Some(path);
                }
                close_dialog = true;
            } else {
                match dialog.state() {
                    DialogState::Cancelled => {
                        cancelled = Some(if is_open { "Open" } else { "Save" });
                        close_dialog = true;
                    }
                    DialogState::Closed => close_dialog = true,
                    _ => {}
                }
            }
        }

        if close_dialog {
            self.active_dialog = None;
        }
        if let Some(action) = cancelled {
            self.report_error(action, &EditorError::NoFileSelected);
        }
        if let Some(path) = picked_open {
            self.start_loading_image_from_path(path);
        }
        if let Some(path) = picked_save {
            self.handle_export(&path);
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader();
        self.handle_hotkeys(ctx);
        self.refresh_preview(ctx);

        if !self.has_image() || self.image.pending.is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::SidePanel::right("side")
            .resizable(true)
            .default_width(260.0)
            .show_animated(ctx, self.ui.side_open, |ui| self.ui_side_controls(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_image(ui));
        self.ui_image_info_window(ctx);
        self.ui_history_window(ctx);

        self.update_dialogs(ctx);
    }

    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}

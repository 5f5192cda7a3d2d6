use super::EditorApp;
use crate::edit::FilterField;
use crate::render;
use egui::{Context, TextureOptions};
use tracing::debug;

impl EditorApp {
    /// Re-render the preview texture if the parameters moved since last frame.
    pub(crate) fn refresh_preview(&mut self, ctx: &Context) {
        if !self.image.preview_dirty {
            return;
        }
        self.image.preview_dirty = false;
        let Some(base) = self.image.preview_base.as_ref() else {
            self.image.texture = None;
            return;
        };
        let params = self.session.params();
        let rendered = render::render(base, params, self.image.preview_scale);
        debug!(
            transform = %render::transform_description(params),
            filter = %render::filter_description(params),
            "preview rendered"
        );
        if let Some(texture) = self.image.texture.as_mut() {
            texture.set(rendered, TextureOptions::LINEAR);
        } else {
            self.image.texture =
                Some(ctx.load_texture("edited-preview", rendered, TextureOptions::LINEAR));
        }
    }

    const fn mark_preview_dirty(&mut self) {
        self.image.preview_dirty = true;
    }

    pub(crate) fn select_filter(&mut self, field: FilterField) {
        self.session.select_filter(field);
    }

    /// Slider moved: show it live, record nothing yet.
    pub(crate) fn preview_active_filter(&mut self, value: f32) {
        if !self.is_image_ready() {
            return;
        }
        self.session.preview_filter(value);
        self.mark_preview_dirty();
    }

    /// Set the active field from a keyboard step or typed value and record it.
    pub(crate) fn set_active_filter(&mut self, value: f32) {
        if !self.is_image_ready() {
            return;
        }
        let field = self.session.active_filter();
        if self.session.set_filter(field, value) {
            self.set_status(format!("{field} set to {}", self.session.slider_label()));
        }
        self.mark_preview_dirty();
    }

    /// Pointer released on the slider.
    pub(crate) fn commit_active_filter(&mut self) {
        if !self.is_image_ready() {
            return;
        }
        if self.session.commit() {
            let field = self.session.active_filter();
            self.set_status(format!("{field} set to {}", self.session.slider_label()));
        }
        self.mark_preview_dirty();
    }

    pub(crate) fn rotate_image(&mut self, clockwise: bool) {
        if !self.is_image_ready() {
            return;
        }
        if clockwise {
            self.session.rotate_right();
        } else {
            self.session.rotate_left();
        }
        self.mark_preview_dirty();
        let rotation = self.session.params().rotation();
        self.set_status(format!("Rotation {rotation}°"));
    }

    pub(crate) fn flip_image(&mut self, horizontal: bool) {
        if !self.is_image_ready() {
            return;
        }
        if horizontal {
            self.session.flip_horizontal();
            self.set_status("Flipped horizontally");
        } else {
            self.session.flip_vertical();
            self.set_status("Flipped vertically");
        }
        self.mark_preview_dirty();
    }

    pub(crate) fn reset_edits(&mut self) {
        if !self.is_image_ready() {
            return;
        }
        if self.session.reset() {
            self.set_status("Adjustments reset (Ctrl+Z to undo)");
        } else {
            self.set_status("Already at defaults");
        }
        self.mark_preview_dirty();
    }

    pub(crate) fn undo_edit(&mut self) {
        if !self.is_image_ready() {
            return;
        }
        if self.session.undo() {
            self.set_status(self.history_position_text("Undo"));
        } else {
            self.set_status("Nothing to undo");
        }
        // An aborted drag may have been discarded even without a step.
        self.mark_preview_dirty();
    }

    pub(crate) fn redo_edit(&mut self) {
        if !self.is_image_ready() {
            return;
        }
        if self.session.redo() {
            self.set_status(self.history_position_text("Redo"));
        } else {
            self.set_status("Nothing to redo");
        }
        self.mark_preview_dirty();
    }

    fn history_position_text(&self, action: &str) -> String {
        let history = self.session.history();
        format!(
            "{action}: step {} of {}",
            history.cursor(),
            history.len().saturating_sub(1)
        )
    }
}

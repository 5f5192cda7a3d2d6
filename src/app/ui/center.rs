use super::super::{EditorApp, safe_usize_to_f32};
use crate::image::oriented_size;
use crate::render;
use egui::{RichText, Vec2};
use tracing::{debug, warn};

/// Largest size with the aspect of `natural` that fits `available`, never upscaled.
fn fit_display_size(natural: Vec2, available: Vec2) -> Vec2 {
    if natural.x <= 0.0 || natural.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (available.x / natural.x)
        .min(available.y / natural.y)
        .clamp(0.0, 1.0);
    natural * scale
}

impl EditorApp {
    fn handle_dropped_files(&mut self, ui: &egui::Ui) {
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        if dropped_files.is_empty() {
            return;
        }
        debug!(count = dropped_files.len(), "files dropped");
        for f in &dropped_files {
            if let Some(path) = &f.path {
                self.start_loading_image_from_path(path.clone());
                return;
            }
            if let Some(bytes) = &f.bytes {
                self.start_loading_image_from_bytes(
                    (!f.name.is_empty()).then(|| f.name.clone()),
                    bytes.to_vec(),
                    f.last_modified,
                );
                return;
            }
        }
        warn!("drop carried neither a path nor bytes");
        self.set_status("Drop failed: no readable bytes/path");
    }

    pub(crate) fn ui_central_image(&mut self, ui: &mut egui::Ui) {
        // Drag & drop works whether or not an image is loaded.
        self.handle_dropped_files(ui);

        let (Some(texture), Some(source)) =
            (self.image.texture.as_ref(), self.image.source.as_ref())
        else {
            ui.centered_and_justified(|ui| {
                let hint = if self.image.pending.is_some() {
                    "Loading…"
                } else {
                    "Open an image (Ctrl+O), paste one (Ctrl+V), or drop a file here."
                };
                ui.label(RichText::new(hint).heading().weak());
            });
            return;
        };

        let params = self.session.params();
        let [w, h] = oriented_size(source.size, params);
        let natural = egui::vec2(safe_usize_to_f32(w), safe_usize_to_f32(h));
        let display_size = fit_display_size(natural, ui.available_size());
        let transform = render::transform_description(params);
        let filter = render::filter_description(params);
        let tex_id = texture.id();

        let padding = ((ui.available_size() - display_size) * 0.5).max(Vec2::ZERO);
        ui.add_space(padding.y);
        ui.horizontal(|ui| {
            ui.add_space(padding.x);
            ui.add(egui::Image::new((tex_id, display_size)))
                .on_hover_ui(|ui| {
                    ui.monospace(format!("transform: {transform}"));
                    ui.monospace(format!("filter: {filter}"));
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_and_never_upscales() {
        let fitted = fit_display_size(egui::vec2(400.0, 200.0), egui::vec2(100.0, 100.0));
        assert_eq!(fitted, egui::vec2(100.0, 50.0));

        let small = fit_display_size(egui::vec2(40.0, 20.0), egui::vec2(1000.0, 1000.0));
        assert_eq!(small, egui::vec2(40.0, 20.0));

        assert_eq!(
            fit_display_size(Vec2::ZERO, egui::vec2(10.0, 10.0)),
            Vec2::ZERO
        );
    }
}

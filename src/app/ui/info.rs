use super::super::EditorApp;
use crate::image::{format_system_time, human_readable_bytes, oriented_size};
use crate::render;
use egui::{Color32, RichText};

impl EditorApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        let history = self.session.history();
        ui.horizontal(|ui| {
            if self.has_image() {
                ui.label(
                    RichText::new(format!(
                        "Step {} / {}",
                        history.cursor(),
                        history.len().saturating_sub(1)
                    ))
                    .small()
                    .color(Color32::from_gray(180)),
                );
            }
            if let Some(msg) = &self.ui.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    pub(crate) fn ui_image_info_window(&mut self, ctx: &egui::Context) {
        if !self.ui.info_window_open {
            return;
        }

        egui::Window::new("Image info")
            .open(&mut self.ui.info_window_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let Some(source) = self.image.source.as_ref() else {
                    ui.label("Load an image to inspect its metadata.");
                    return;
                };
                ui.heading("File");
                if let Some(meta) = self.image.meta.as_ref() {
                    ui.label(format!("Source: {}", meta.source_label()));
                    ui.label(format!("Name: {}", meta.display_name()));
                    if let Some(path) = meta.path() {
                        ui.label(format!("Path: {}", path.display()));
                    }
                    ui.label(format!("Format: {}", meta.format_label()));
                    match meta.byte_len {
                        Some(bytes) => ui.label(format!(
                            "Size: {} ({bytes} bytes)",
                            human_readable_bytes(bytes)
                        )),
                        None => ui.label("Size: Unknown"),
                    };
                    match meta.last_modified {
                        Some(modified) => {
                            ui.label(format!("Modified: {}", format_system_time(modified)))
                        }
                        None => ui.label("Modified: Unknown"),
                    };
                }

                ui.add_space(6.0);
                ui.heading("Image");
                let [w, h] = source.size;
                ui.label(format!("Dimensions: {w} × {h} px"));
                let params = self.session.params();
                let [ow, oh] = oriented_size(source.size, params);
                ui.label(format!("Export size: {ow} × {oh} px"));
                if self.image.preview_scale < 1.0 {
                    ui.label(format!(
                        "Preview scale: {:.0}%",
                        self.image.preview_scale * 100.0
                    ));
                }

                ui.add_space(6.0);
                ui.heading("Adjustments");
                ui.monospace(render::transform_description(params));
                ui.monospace(render::filter_description(params));
            });
    }
}

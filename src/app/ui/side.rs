//! Side panel UI: filter selection, the shared slider, and transform buttons.

use super::super::EditorApp;
use super::icons;
use crate::edit::{FilterField, ParameterState};
use egui::{Color32, RichText};

impl EditorApp {
    pub(crate) fn ui_side_controls(&mut self, ui: &mut egui::Ui) {
        let has_image = self.has_image();
        ui.add_enabled_ui(self.is_image_ready(), |ui| {
            self.ui_filter_section(ui);
            ui.separator();
            self.ui_transform_section(ui);
            ui.separator();
            self.ui_reset_section(ui);
        });
        if !has_image {
            ui.label(RichText::new("Load an image to start editing.").small());
        }

        let remaining = ui.available_height().max(0.0);
        if remaining > 24.0 {
            ui.add_space(remaining - 20.0);
        }
        ui.separator();
        ui.label(
            RichText::new(format!("Version {}", super::super::APP_VERSION))
                .small()
                .color(Color32::from_gray(160)),
        );
    }

    fn ui_filter_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");
        let active = self.session.active_filter();
        // Exclusive choice; the slider below follows it.
        ui.horizontal_wrapped(|ui| {
            for field in FilterField::ALL {
                if ui.selectable_label(active == field, field.label()).clicked() && field != active
                {
                    self.select_filter(field);
                }
            }
        });
        ui.add_space(6.0);

        let field = self.session.active_filter();
        ui.horizontal(|ui| {
            ui.label(RichText::new(field.label()).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.monospace(self.session.slider_label());
            });
        });

        let mut value = self.session.active_value();
        let width = ui.available_width();
        ui.spacing_mut().slider_width = width;
        let response = ui.add(
            egui::Slider::new(&mut value, field.range())
                .show_value(false)
                .step_by(1.0),
        );
        self.route_value_response(&response, value);

        ui.horizontal(|ui| {
            ui.label("Exact:");
            let mut exact = self.session.active_value();
            let response = ui.add(
                egui::DragValue::new(&mut exact)
                    .range(field.range())
                    .speed(0.5)
                    .max_decimals(0)
                    .suffix(field.unit_suffix()),
            );
            self.route_value_response(&response, exact);
        });
    }

    /// Pointer held: preview only. Release records; keyboard or typed input records at once.
    fn route_value_response(&mut self, response: &egui::Response, value: f32) {
        if response.changed() {
            if response.is_pointer_button_down_on() {
                self.preview_active_filter(value);
            } else {
                self.set_active_filter(value);
            }
        }
        if response.drag_stopped() || response.clicked() {
            self.commit_active_filter();
        }
    }

    fn ui_transform_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Rotate & flip");
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Left", icons::ICON_ROTATE_CCW))
                .on_hover_text("Rotate 90° counter-clockwise")
                .clicked()
            {
                self.rotate_image(false);
            }
            if ui
                .button(format!("{} Right", icons::ICON_ROTATE_CW))
                .on_hover_text("Rotate 90° clockwise")
                .clicked()
            {
                self.rotate_image(true);
            }
        });
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Flip H", icons::ICON_FLIP_H))
                .on_hover_text("Mirror left-right")
                .clicked()
            {
                self.flip_image(true);
            }
            if ui
                .button(format!("{} Flip V", icons::ICON_FLIP_V))
                .on_hover_text("Mirror top-bottom")
                .clicked()
            {
                self.flip_image(false);
            }
        });
    }

    fn ui_reset_section(&mut self, ui: &mut egui::Ui) {
        let at_defaults = *self.session.params() == ParameterState::default();
        if ui
            .add_enabled(
                !at_defaults,
                egui::Button::new(format!("{} Reset adjustments", icons::ICON_RESET)),
            )
            .on_hover_text("Return every filter and transform to its default (undoable)")
            .clicked()
        {
            self.reset_edits();
        }
    }
}

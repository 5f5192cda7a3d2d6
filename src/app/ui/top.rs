use super::super::EditorApp;
use super::icons;

impl EditorApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            let has_image = self.has_image();
            let ready = self.is_image_ready();
            let file_menu_response = self.ui_file_menu(ui, ready);
            self.paint_attention_outline_if(
                ui,
                file_menu_response.rect,
                !has_image && self.image.pending.is_none(),
            );
            ui.separator();

            self.ui_history_buttons(ui, ready);
            ui.separator();

            self.ui_window_buttons(ui, has_image);
            ui.separator();

            let side_label = if self.ui.side_open {
                "Hide controls"
            } else {
                "Show controls"
            };
            if ui
                .add(
                    egui::Button::new(format!("{} {side_label}", icons::ICON_SIDE_TOGGLE))
                        .shortcut_text("Ctrl+B"),
                )
                .on_hover_text("Toggle the adjustment panel (Ctrl+B)")
                .clicked()
            {
                self.ui.side_open = !self.ui.side_open;
            }
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui, can_save: bool) -> egui::Response {
        let file_menu = ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open an image (Ctrl+O). You can also drag & drop into the center.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }

            if ui
                .add(egui::Button::new("Paste image").shortcut_text("Ctrl+V"))
                .on_hover_text("Paste image from clipboard (Ctrl+V)")
                .clicked()
            {
                self.paste_image_from_clipboard();
                ui.close();
            }

            ui.separator();

            if ui
                .add_enabled(
                    can_save,
                    egui::Button::new(format!("{} Save image…", icons::ICON_SAVE))
                        .shortcut_text("Ctrl+S"),
                )
                .on_hover_text("Write the edited image to a file (Ctrl+S)")
                .clicked()
            {
                self.start_export();
                ui.close();
            }
        });
        file_menu.response
    }

    fn ui_history_buttons(&mut self, ui: &mut egui::Ui, ready: bool) {
        if ui
            .add_enabled(
                ready && self.session.can_undo(),
                egui::Button::new(format!("{} Undo", icons::ICON_UNDO)).shortcut_text("Ctrl+Z"),
            )
            .on_hover_text("Step back one edit (Ctrl+Z)")
            .clicked()
        {
            self.undo_edit();
        }
        if ui
            .add_enabled(
                ready && self.session.can_redo(),
                egui::Button::new(format!("{} Redo", icons::ICON_REDO)).shortcut_text("Ctrl+Y"),
            )
            .on_hover_text("Step forward one edit (Ctrl+Y or Ctrl+Shift+Z)")
            .clicked()
        {
            self.redo_edit();
        }
    }

    fn ui_window_buttons(&mut self, ui: &mut egui::Ui, has_image: bool) {
        if ui
            .add_enabled(
                has_image,
                egui::Button::new(format!("{} History", icons::ICON_HISTORY)),
            )
            .on_hover_text("List every recorded edit")
            .clicked()
        {
            self.ui.history_window_open = true;
        }
        if ui
            .add_enabled(
                has_image,
                egui::Button::new(format!("{} Image info", icons::ICON_INFO))
                    .shortcut_text("Ctrl+I"),
            )
            .on_hover_text("Show file & image details (Ctrl+I)")
            .clicked()
        {
            self.ui.info_window_open = true;
        }
    }
}

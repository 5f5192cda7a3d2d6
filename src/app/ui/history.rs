use super::super::EditorApp;
use super::icons;
use crate::edit::{FilterField, ParameterState};
use egui::RichText;

/// Short text naming what differs from the defaults, e.g. `Brightness 150%, 90°`.
fn entry_summary(state: &ParameterState) -> String {
    let mut parts: Vec<String> = FilterField::ALL
        .into_iter()
        .filter(|field| (state.get(*field) - field.default_value()).abs() > f32::EPSILON)
        .map(|field| format!("{field} {}", field.format_value(state.get(field))))
        .collect();
    if state.rotation() != 0 {
        parts.push(format!("{}°", state.rotation()));
    }
    if state.flip_horizontal().is_mirrored() {
        parts.push("flip H".to_string());
    }
    if state.flip_vertical().is_mirrored() {
        parts.push("flip V".to_string());
    }
    if parts.is_empty() {
        "defaults".to_string()
    } else {
        parts.join(", ")
    }
}

impl EditorApp {
    pub(crate) fn ui_history_window(&mut self, ctx: &egui::Context) {
        if !self.ui.history_window_open {
            return;
        }

        let history = self.session.history();
        egui::Window::new("History")
            .open(&mut self.ui.history_window_open)
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!(
                        "{} entries; {} marks the active one, {} a revisited one.",
                        history.len(),
                        icons::ICON_CURSOR,
                        icons::ICON_REVISITED
                    ))
                    .small(),
                );
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for entry in history.entries() {
                        let is_cursor = entry.sequence_index == history.cursor();
                        let marker = if is_cursor { icons::ICON_CURSOR } else { " " };
                        let revisited = if entry.was_revisited {
                            icons::ICON_REVISITED
                        } else {
                            " "
                        };
                        let text = format!(
                            "{marker}{revisited} #{:<3} {}",
                            entry.sequence_index,
                            entry_summary(&entry.state)
                        );
                        let text = RichText::new(text).monospace();
                        if entry.sequence_index > history.cursor() {
                            ui.label(text.weak());
                        } else if is_cursor {
                            ui.label(text.strong());
                        } else {
                            ui.label(text);
                        }
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_changed_fields() {
        assert_eq!(entry_summary(&ParameterState::default()), "defaults");

        let mut state = ParameterState::default()
            .with(FilterField::Brightness, 150.0)
            .with(FilterField::Blur, 2.0);
        state.rotate_left();
        state.toggle_flip_vertical();
        assert_eq!(
            entry_summary(&state),
            "Brightness 150%, Blur 2px, -90°, flip V"
        );
    }
}

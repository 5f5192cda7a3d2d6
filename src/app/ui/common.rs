use super::super::{
    ATTENTION_ALPHA_MAX, ATTENTION_ALPHA_MIN, ATTENTION_BLINK_SPEED, ATTENTION_OUTLINE_PAD,
    EditorApp, rounded_u8,
};
use egui::{Color32, CornerRadius, StrokeKind};

/// Smoothstep pulse in `0..=1` for a blinking highlight at `time` seconds.
fn attention_pulse(time: f32) -> f32 {
    let blink = (time * ATTENTION_BLINK_SPEED)
        .sin()
        .mul_add(0.5, 0.5)
        .clamp(0.0, 1.0);
    blink * blink * 2.0f32.mul_add(-blink, 3.0)
}

impl EditorApp {
    fn attention_color(ctx: &egui::Context, base: Color32) -> Color32 {
        let [r, g, b, a] = base.to_array();
        #[allow(clippy::cast_possible_truncation)]
        let time = ctx.input(|i| i.time) as f32;
        let intensity = egui::lerp(
            ATTENTION_ALPHA_MIN..=ATTENTION_ALPHA_MAX,
            attention_pulse(time),
        );
        let alpha = rounded_u8(f32::from(a) * intensity);
        Color32::from_rgba_unmultiplied(r, g, b, alpha)
    }

    /// Blinking outline drawing the eye to the next useful control.
    pub(crate) fn paint_attention_outline_if(&self, ui: &egui::Ui, rect: egui::Rect, active: bool) {
        if !active || !ui.is_rect_visible(rect) {
            return;
        }
        let mut stroke = self.config.attention_highlight.stroke();
        stroke.color = Self::attention_color(ui.ctx(), stroke.color);
        ui.painter().rect_stroke(
            rect.expand(ATTENTION_OUTLINE_PAD),
            CornerRadius::ZERO,
            stroke,
            StrokeKind::Outside,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_stays_in_unit_range() {
        for step in 0..200u16 {
            let pulse = attention_pulse(f32::from(step) * 0.05);
            assert!((0.0..=1.0).contains(&pulse), "pulse {pulse} out of range");
        }
    }
}

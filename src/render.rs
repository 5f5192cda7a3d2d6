//! Turns a [`ParameterState`] into pixels: geometry first, then the six
//! filters as a post-process.

use crate::edit::{FilterField, ParameterState};
use crate::image::{ImageFilters, apply_geometry, apply_image_filters};
use egui::ColorImage;
use std::fmt::Write as _;

/// CSS-style transform text, e.g. `rotate(90deg) scaleX(-1) scaleY(1)`.
pub fn transform_description(params: &ParameterState) -> String {
    format!(
        "rotate({}deg) scaleX({}) scaleY({})",
        params.rotation(),
        params.flip_horizontal().sign(),
        params.flip_vertical().sign()
    )
}

/// CSS-style filter chain in compositing order.
pub fn filter_description(params: &ParameterState) -> String {
    let mut out = String::new();
    for field in FilterField::ALL {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(
            out,
            "{}({})",
            css_filter_name(field),
            field.format_value(params.get(field))
        );
    }
    out
}

const fn css_filter_name(field: FilterField) -> &'static str {
    match field {
        FilterField::Brightness => "brightness",
        FilterField::Saturation => "saturate",
        FilterField::Inversion => "invert",
        FilterField::Grayscale => "grayscale",
        FilterField::Blur => "blur",
        FilterField::Contrast => "contrast",
    }
}

/// Composite `source` under `params`. `blur_scale` is the ratio between
/// `source` and the full-resolution image, so previews blur proportionally.
pub fn render(source: &ColorImage, params: &ParameterState, blur_scale: f32) -> ColorImage {
    if params.is_identity() {
        return source.clone();
    }
    let placed = apply_geometry(source, params);
    apply_image_filters(&placed, ImageFilters::from_params(params, blur_scale))
}

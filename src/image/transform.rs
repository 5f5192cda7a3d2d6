use crate::edit::ParameterState;
use egui::{Color32, ColorImage};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use rayon::prelude::*;

/// Minimum pixel count before parallelizing per-pixel work.
const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

pub(super) fn map_pixels(
    total_pixels: usize,
    f: impl Fn(usize) -> Color32 + Sync + Send,
) -> Vec<Color32> {
    if total_pixels >= PARALLEL_PIXEL_THRESHOLD {
        (0..total_pixels).into_par_iter().map(f).collect()
    } else {
        (0..total_pixels).map(f).collect()
    }
}

/// Rotate 90 degrees clockwise.
pub fn rotate_cw(image: &ColorImage) -> ColorImage {
    let [width, height] = image.size;
    if width == 0 || height == 0 {
        return image.clone();
    }
    let new_width = height;
    let pixels = &image.pixels;
    let rotated = map_pixels(width * height, |idx| {
        let dx = idx % new_width;
        let dy = idx / new_width;
        pixels[(new_width - 1 - dx) * width + dy]
    });
    ColorImage::new([height, width], rotated)
}

/// Rotate 180 degrees.
pub fn rotate_half(image: &ColorImage) -> ColorImage {
    let mut pixels = image.pixels.clone();
    pixels.reverse();
    ColorImage::new(image.size, pixels)
}

/// Rotate 90 degrees counter-clockwise.
pub fn rotate_ccw(image: &ColorImage) -> ColorImage {
    let [width, height] = image.size;
    if width == 0 || height == 0 {
        return image.clone();
    }
    let new_width = height;
    let pixels = &image.pixels;
    let rotated = map_pixels(width * height, |idx| {
        let dx = idx % new_width;
        let dy = idx / new_width;
        pixels[dx * width + (width - 1 - dy)]
    });
    ColorImage::new([height, width], rotated)
}

/// Mirror left-right.
pub fn flip_horizontal(image: &ColorImage) -> ColorImage {
    let [width, height] = image.size;
    if width == 0 || height == 0 {
        return image.clone();
    }
    let pixels = &image.pixels;
    let flipped = map_pixels(width * height, |idx| {
        let x = idx % width;
        let y = idx / width;
        pixels[y * width + (width - 1 - x)]
    });
    ColorImage::new([width, height], flipped)
}

/// Mirror top-bottom.
pub fn flip_vertical(image: &ColorImage) -> ColorImage {
    let [width, height] = image.size;
    if width == 0 || height == 0 {
        return image.clone();
    }
    let pixels = &image.pixels;
    let flipped = map_pixels(width * height, |idx| {
        let x = idx % width;
        let y = idx / width;
        pixels[(height - 1 - y) * width + x]
    });
    ColorImage::new([width, height], flipped)
}

/// Size of the surface after rotation: odd quarter turns swap the sides.
pub const fn oriented_size(size: [usize; 2], params: &ParameterState) -> [usize; 2] {
    if params.quarter_turns() % 2 == 1 {
        [size[1], size[0]]
    } else {
        size
    }
}

/// Place the image the way a canvas would after translating to its center,
/// rotating by the accumulated angle, then scaling by the flip signs: the
/// flips act on the source first, the rotation after.
pub fn apply_geometry(image: &ColorImage, params: &ParameterState) -> ColorImage {
    let mut out = match (
        params.flip_horizontal().is_mirrored(),
        params.flip_vertical().is_mirrored(),
    ) {
        (false, false) => image.clone(),
        (true, false) => flip_horizontal(image),
        (false, true) => flip_vertical(image),
        (true, true) => rotate_half(image),
    };
    out = match params.quarter_turns() {
        1 => rotate_cw(&out),
        2 => rotate_half(&out),
        3 => rotate_ccw(&out),
        _ => out,
    };
    out
}

/// Downscale so neither side exceeds `max_side`. Returns the scale factor used.
pub fn fit_within(image: &ColorImage, max_side: u32) -> (ColorImage, f32) {
    let [width, height] = image.size;
    let longest = width.max(height);
    let max_side = max_side as usize;
    if longest <= max_side || longest == 0 {
        return (image.clone(), 1.0);
    }
    let Some(rgba) = to_rgba_image(image) else {
        return (image.clone(), 1.0);
    };
    #[allow(clippy::cast_precision_loss)]
    let scale = max_side as f32 / longest as f32;
    let scaled = |side: usize| {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let value = (side as f32 * scale).round().max(1.0) as u32;
        value
    };
    let resized = imageops::resize(
        &rgba,
        scaled(width),
        scaled(height),
        FilterType::Triangle,
    );
    (from_rgba_image(&resized), scale)
}

/// Copy into an `image` buffer (unmultiplied RGBA8).
pub fn to_rgba_image(image: &ColorImage) -> Option<RgbaImage> {
    let [width, height] = image.size;
    let bytes: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    RgbaImage::from_raw(
        u32::try_from(width).ok()?,
        u32::try_from(height).ok()?,
        bytes,
    )
}

pub fn from_rgba_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Flip;

    fn color_id(id: u8) -> Color32 {
        Color32::from_rgb(id, 0, 0)
    }

    fn ids_from_image(image: &ColorImage) -> Vec<u8> {
        image
            .pixels
            .iter()
            .map(|c| c.to_srgba_unmultiplied()[0])
            .collect()
    }

    // 1 2 3
    // 4 5 6
    fn test_image() -> ColorImage {
        ColorImage::new([3, 2], (1..=6).map(color_id).collect())
    }

    fn params(rotation: i32, flip_h: bool, flip_v: bool) -> ParameterState {
        let mut params = ParameterState::default();
        params.set_rotation(rotation);
        if flip_h {
            params.toggle_flip_horizontal();
        }
        if flip_v {
            params.toggle_flip_vertical();
        }
        params
    }

    #[test]
    fn rotate_cw_maps_pixels() {
        let out = rotate_cw(&test_image());
        assert_eq!(out.size, [2, 3]);
        assert_eq!(ids_from_image(&out), vec![4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn rotate_ccw_maps_pixels() {
        let out = rotate_ccw(&test_image());
        assert_eq!(out.size, [2, 3]);
        assert_eq!(ids_from_image(&out), vec![3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn flips_map_pixels() {
        assert_eq!(
            ids_from_image(&flip_horizontal(&test_image())),
            vec![3, 2, 1, 6, 5, 4]
        );
        assert_eq!(
            ids_from_image(&flip_vertical(&test_image())),
            vec![4, 5, 6, 1, 2, 3]
        );
    }

    #[test]
    fn geometry_identity_keeps_pixels() {
        let out = apply_geometry(&test_image(), &ParameterState::default());
        assert_eq!(out, test_image());
    }

    #[test]
    fn negative_rotation_turns_left() {
        let out = apply_geometry(&test_image(), &params(-90, false, false));
        assert_eq!(ids_from_image(&out), ids_from_image(&rotate_ccw(&test_image())));
        let full = apply_geometry(&test_image(), &params(-360, false, false));
        assert_eq!(full, test_image());
    }

    #[test]
    fn flip_applies_before_rotation() {
        // Mirror first: 3 2 1 / 6 5 4, then a clockwise quarter turn.
        let out = apply_geometry(&test_image(), &params(90, true, false));
        assert_eq!(out.size, [2, 3]);
        assert_eq!(ids_from_image(&out), vec![6, 3, 5, 2, 4, 1]);
    }

    #[test]
    fn double_flip_is_half_turn() {
        let out = apply_geometry(&test_image(), &params(0, true, true));
        assert_eq!(ids_from_image(&out), vec![6, 5, 4, 3, 2, 1]);
        let p = params(180, true, true);
        assert_eq!(p.flip_vertical(), Flip::Mirrored);
        assert_eq!(apply_geometry(&test_image(), &p), test_image());
    }

    #[test]
    fn oriented_size_swaps_on_odd_turns() {
        assert_eq!(oriented_size([3, 2], &params(90, false, false)), [2, 3]);
        assert_eq!(oriented_size([3, 2], &params(180, false, false)), [3, 2]);
        assert_eq!(oriented_size([3, 2], &params(-270, false, false)), [2, 3]);
    }

    #[test]
    fn fit_within_downscales_long_side() {
        let image = ColorImage::new([400, 100], vec![Color32::WHITE; 400 * 100]);
        let (small, scale) = fit_within(&image, 200);
        assert_eq!(small.size, [200, 50]);
        assert!((scale - 0.5).abs() < f32::EPSILON);

        let (same, scale) = fit_within(&image, 1000);
        assert_eq!(same.size, [400, 100]);
        assert!((scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rgba_conversion_preserves_pixels() {
        let image = test_image();
        let rgba = to_rgba_image(&image).expect("dimensions fit in u32");
        assert_eq!(rgba.dimensions(), (3, 2));
        assert_eq!(rgba.get_pixel(2, 1).0, [6, 0, 0, 255]);
        let back = from_rgba_image(&rgba);
        assert_eq!(back.size, image.size);
        assert_eq!(back.pixels, image.pixels);
    }
}

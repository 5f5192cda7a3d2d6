use super::transform::map_pixels;
use crate::edit::{FilterField, ParameterState};
use egui::{Color32, ColorImage};

/// Filter amounts as fractions, ready for per-pixel math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFilters {
    pub brightness: f32,
    pub saturation: f32,
    pub inversion: f32,
    pub grayscale: f32,
    pub blur_radius: u32,
    pub contrast: f32,
}

impl Default for ImageFilters {
    fn default() -> Self {
        Self::from_params(&ParameterState::default(), 1.0)
    }
}

impl ImageFilters {
    /// Convert percent/pixel parameters. `blur_scale` shrinks the blur radius
    /// when rendering a downscaled preview.
    pub fn from_params(params: &ParameterState, blur_scale: f32) -> Self {
        let percent = |field| params.get(field) / 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let blur_radius = (params.get(FilterField::Blur) * blur_scale.max(0.0))
            .round()
            .max(0.0) as u32;
        Self {
            brightness: percent(FilterField::Brightness),
            saturation: percent(FilterField::Saturation),
            inversion: percent(FilterField::Inversion),
            grayscale: percent(FilterField::Grayscale),
            blur_radius,
            contrast: percent(FilterField::Contrast),
        }
    }

    pub fn is_identity(self) -> bool {
        (self.brightness - 1.0).abs() <= f32::EPSILON
            && (self.saturation - 1.0).abs() <= f32::EPSILON
            && self.inversion.abs() <= f32::EPSILON
            && self.grayscale.abs() <= f32::EPSILON
            && self.blur_radius == 0
            && (self.contrast - 1.0).abs() <= f32::EPSILON
    }

    fn tone_is_identity(self) -> bool {
        Self {
            blur_radius: 0,
            contrast: 1.0,
            ..self
        }
        .is_identity()
    }

    /// Brightness, saturate, invert and grayscale, in that order.
    fn apply_tone(self, rgb: [f32; 3]) -> [f32; 3] {
        let mut rgb = rgb.map(|c| (c * self.brightness).clamp(0.0, 1.0));
        if (self.saturation - 1.0).abs() > f32::EPSILON {
            rgb = apply_matrix(&saturate_matrix(self.saturation), rgb);
        }
        rgb = rgb.map(|c| self.inversion.mul_add(2.0f32.mul_add(-c, 1.0), c).clamp(0.0, 1.0));
        if self.grayscale > f32::EPSILON {
            rgb = apply_matrix(&grayscale_matrix(self.grayscale), rgb);
        }
        rgb
    }

    fn apply_contrast(self, rgb: [f32; 3]) -> [f32; 3] {
        rgb.map(|c| (c - 0.5).mul_add(self.contrast, 0.5).clamp(0.0, 1.0))
    }
}

type Matrix3 = [[f32; 3]; 3];

fn saturate_matrix(s: f32) -> Matrix3 {
    let s = s.max(0.0);
    [
        [0.787f32.mul_add(s, 0.213), 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.285f32.mul_add(s, 0.715), 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.928f32.mul_add(s, 0.072)],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix3 {
    let g = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.7874f32.mul_add(g, 0.2126), 0.7152 - 0.7152 * g, 0.0722 - 0.0722 * g],
        [0.2126 - 0.2126 * g, 0.2848f32.mul_add(g, 0.7152), 0.0722 - 0.0722 * g],
        [0.2126 - 0.2126 * g, 0.7152 - 0.7152 * g, 0.9278f32.mul_add(g, 0.0722)],
    ]
}

fn apply_matrix(m: &Matrix3, [r, g, b]: [f32; 3]) -> [f32; 3] {
    m.map(|row| row[2].mul_add(b, row[0].mul_add(r, row[1] * g)).clamp(0.0, 1.0))
}

fn to_unit(pixel: Color32) -> ([f32; 3], u8) {
    let [r, g, b, a] = pixel.to_srgba_unmultiplied();
    (
        [f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0],
        a,
    )
}

fn from_unit([r, g, b]: [f32; 3], a: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(float_to_u8(r), float_to_u8(g), float_to_u8(b), a)
}

fn map_color(image: &ColorImage, f: impl Fn([f32; 3]) -> [f32; 3] + Sync + Send) -> ColorImage {
    let pixels = &image.pixels;
    let mapped = map_pixels(pixels.len(), |idx| {
        let (rgb, a) = to_unit(pixels[idx]);
        from_unit(f(rgb), a)
    });
    ColorImage::new(image.size, mapped)
}

/// Run the six filters over `base` in compositing order.
pub fn apply_image_filters(base: &ColorImage, filters: ImageFilters) -> ColorImage {
    if base.pixels.is_empty() || filters.is_identity() {
        return base.clone();
    }

    let mut image = if filters.tone_is_identity() {
        base.clone()
    } else {
        map_color(base, |rgb| filters.apply_tone(rgb))
    };

    if filters.blur_radius > 0 {
        image = ColorImage::new(image.size, box_blur(&image, filters.blur_radius));
    }

    if (filters.contrast - 1.0).abs() > f32::EPSILON {
        image = map_color(&image, |rgb| filters.apply_contrast(rgb));
    }

    image
}

fn float_to_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Separable box blur over premultiplied channels; the window shrinks at edges.
fn box_blur(image: &ColorImage, radius: u32) -> Vec<Color32> {
    let [width, height] = image.size;
    if radius == 0 || width == 0 || height == 0 {
        return image.pixels.clone();
    }
    let radius = radius as usize;
    let premultiplied: Vec<[u8; 4]> = image.pixels.iter().map(|c| c.to_array()).collect();
    let horiz = blur_lines(&premultiplied, width, height, radius, 1, width);
    let vert = blur_lines(&horiz, height, width, radius, width, 1);
    vert.into_iter()
        .map(|[r, g, b, a]| Color32::from_rgba_premultiplied(r, g, b, a))
        .collect()
}

/// Average `len`-long lines; `step` walks within a line, `line_stride` between lines.
fn blur_lines(
    src: &[[u8; 4]],
    len: usize,
    lines: usize,
    radius: usize,
    step: usize,
    line_stride: usize,
) -> Vec<[u8; 4]> {
    let mut out = vec![[0u8; 4]; src.len()];
    let mut prefix = vec![[0u32; 4]; len + 1];
    for line in 0..lines {
        let start = line * line_stride;
        for i in 0..len {
            let px = src[start + i * step];
            let prev = prefix[i];
            prefix[i + 1] = [
                prev[0] + u32::from(px[0]),
                prev[1] + u32::from(px[1]),
                prev[2] + u32::from(px[2]),
                prev[3] + u32::from(px[3]),
            ];
        }
        for i in 0..len {
            let i0 = i.saturating_sub(radius);
            let i1 = (i + radius).min(len - 1);
            #[allow(clippy::cast_possible_truncation)]
            let count = (i1 - i0 + 1) as u32;
            let sum = prefix[i1 + 1];
            let base = prefix[i0];
            #[allow(clippy::cast_possible_truncation)]
            let avg = |c: usize| ((sum[c] - base[c] + count / 2) / count) as u8;
            out[start + i * step] = [avg(0), avg(1), avg(2), avg(3)];
        }
    }
    out
}

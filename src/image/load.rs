use crate::config::ImageLimits;
use anyhow::Context as _;
use egui::ColorImage;
use image::{GenericImageView, ImageFormat, ImageReader, Limits};
use std::io::{BufRead, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Decoded pixels plus the container format they came from.
pub struct DecodedImage {
    pub pixels: ColorImage,
    pub format: Option<ImageFormat>,
}

fn decode_reader<R>(
    limits: &ImageLimits,
    mut reader: ImageReader<R>,
) -> anyhow::Result<DecodedImage>
where
    R: Read + Seek + BufRead,
{
    let il = limits.sanitized();
    let mut decode_limits = Limits::default();
    decode_limits.max_image_width = Some(il.image_dim);
    decode_limits.max_image_height = Some(il.image_dim);
    decode_limits.max_alloc = Some(il.alloc_bytes);
    reader.limits(decode_limits);
    let format = reader.format();
    let img = reader.decode().context("Failed to decode image data")?;

    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        anyhow::bail!("Image has no pixels ({w}x{h})");
    }
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > il.total_pixels {
        anyhow::bail!(
            "Image too large: {}x{} (~{} MP) exceeds limit (~{} MP)",
            w,
            h,
            total_pixels / 1_000_000,
            il.total_pixels / 1_000_000
        );
    }
    debug!(width = w, height = h, ?format, "decoded image");

    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        pixels: ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba),
        format,
    })
}

/// Decode an image file, guessing the format from its contents.
pub fn decode_image_from_path(limits: &ImageLimits, path: &Path) -> anyhow::Result<DecodedImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader(limits, reader)
}

/// Decode in-memory image bytes (drag & drop without a path).
pub fn decode_image_from_bytes(
    limits: &ImageLimits,
    bytes: Vec<u8>,
) -> anyhow::Result<DecodedImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader(limits, reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png_bytes() {
        let decoded =
            decode_image_from_bytes(&ImageLimits::default(), png_bytes(4, 3)).expect("decode");
        assert_eq!(decoded.pixels.size, [4, 3]);
        assert_eq!(decoded.format, Some(ImageFormat::Png));
        assert_eq!(
            decoded.pixels.pixels[0].to_srgba_unmultiplied(),
            [10, 20, 30, 255]
        );
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = decode_image_from_bytes(&ImageLimits::default(), b"not an image".to_vec());
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = decode_image_from_path(&ImageLimits::default(), Path::new("/no/such/file.png"))
            .err()
            .expect("missing file should fail");
        assert!(format!("{err:#}").contains("/no/such/file.png"));
    }
}

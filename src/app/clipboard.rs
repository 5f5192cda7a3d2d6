use super::EditorApp;
use crate::config::ImageLimits;
use crate::image::{ImageMeta, human_readable_bytes};
use arboard::{Clipboard, Error as ClipboardError};
use egui::ColorImage;
use tracing::warn;

struct ClipboardCapture {
    image: ColorImage,
    byte_len: usize,
}

#[derive(Debug, PartialEq, Eq)]
struct ClipboardSize {
    width: usize,
    height: usize,
    expected_len: usize,
}

impl EditorApp {
    pub(crate) fn paste_image_from_clipboard(&mut self) {
        self.image.pending = None;
        match capture_clipboard_image(&self.config.effective_image_limits()) {
            Ok(captured) => {
                let meta = ImageMeta::clipboard(u64::try_from(captured.byte_len).ok());
                self.install_image(captured.image, meta);
            }
            Err(err) => {
                warn!("{err}");
                self.set_status(err);
            }
        }
    }
}

fn capture_clipboard_image(limits: &ImageLimits) -> Result<ClipboardCapture, String> {
    let mut clipboard = Clipboard::new().map_err(describe_clipboard_error)?;
    let data = clipboard.get_image().map_err(describe_clipboard_error)?;
    let size = check_clipboard_size(limits, data.width, data.height)?;
    let bytes = data.bytes.into_owned();
    if bytes.len() < size.expected_len {
        return Err("Paste failed: clipboard image data is truncated.".to_string());
    }
    let image =
        ColorImage::from_rgba_unmultiplied([size.width, size.height], &bytes[..size.expected_len]);
    Ok(ClipboardCapture {
        image,
        byte_len: size.expected_len,
    })
}

fn check_clipboard_size(
    limits: &ImageLimits,
    width: usize,
    height: usize,
) -> Result<ClipboardSize, String> {
    if width == 0 || height == 0 {
        return Err("Paste failed: clipboard image is empty.".to_string());
    }
    let longest = u32::try_from(width.max(height)).unwrap_or(u32::MAX);
    if longest > limits.image_dim {
        return Err(format!(
            "Paste failed: {width}x{height} exceeds the per-side limit of {} px.",
            limits.image_dim
        ));
    }
    let total_pixels = u64::try_from(width)
        .ok()
        .zip(u64::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .ok_or_else(|| "Paste failed: clipboard dimensions overflow.".to_string())?;
    if total_pixels > limits.total_pixels {
        return Err(format!(
            "Paste failed: {width}x{height} (~{} MP) exceeds the limit (~{} MP).",
            total_pixels / 1_000_000,
            limits.total_pixels / 1_000_000
        ));
    }
    let rgba_bytes = total_pixels
        .checked_mul(4)
        .filter(|bytes| *bytes <= limits.alloc_bytes)
        .ok_or_else(|| {
            format!(
                "Paste failed: image needs more than the {} allocation limit.",
                human_readable_bytes(limits.alloc_bytes)
            )
        })?;
    let expected_len = usize::try_from(rgba_bytes)
        .map_err(|_| "Paste failed: image does not fit in memory.".to_string())?;
    Ok(ClipboardSize {
        width,
        height,
        expected_len,
    })
}

fn describe_clipboard_error(err: ClipboardError) -> String {
    match err {
        ClipboardError::ContentNotAvailable => {
            "Paste failed: clipboard does not contain an image.".to_string()
        }
        ClipboardError::ClipboardNotSupported => {
            "Paste failed: clipboard access is not supported here.".to_string()
        }
        ClipboardError::ClipboardOccupied => {
            "Paste failed: clipboard is busy; try again.".to_string()
        }
        _ => format!("Paste failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_image() {
        let size = check_clipboard_size(&ImageLimits::default(), 4, 3).expect("fits");
        assert_eq!(
            size,
            ClipboardSize {
                width: 4,
                height: 3,
                expected_len: 48
            }
        );
    }

    #[test]
    fn rejects_empty_and_oversized() {
        let limits = ImageLimits::default();
        assert!(check_clipboard_size(&limits, 0, 10).is_err());
        let too_wide = limits.image_dim as usize + 1;
        let err = check_clipboard_size(&limits, too_wide, 1).expect_err("too wide");
        assert!(err.contains("per-side limit"));
    }
}

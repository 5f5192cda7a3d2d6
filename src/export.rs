use crate::config::ExportSettings;
use crate::edit::ParameterState;
use crate::error::EditorError;
use crate::image::to_rgba_image;
use crate::render;
use egui::ColorImage;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use serde::Deserialize;
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Container formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
    Bmp,
    #[serde(alias = "tif")]
    Tiff,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Png, Self::Jpeg, Self::Bmp, Self::Tiff];

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

/// What an export wrote.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub size: [usize; 2],
    pub byte_len: usize,
}

/// Pick the format from the target's extension. A bare name gets the
/// fallback format's extension appended.
pub fn resolve_target(
    path: &Path,
    fallback: ExportFormat,
) -> Result<(PathBuf, ExportFormat), EditorError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ExportFormat::from_extension(ext)
            .map(|format| (path.to_path_buf(), format))
            .ok_or_else(|| EditorError::UnsupportedExportFormat(ext.to_string())),
        None => Ok((path.with_extension(fallback.extension()), fallback)),
    }
}

/// Composite the full-resolution image. Fails until a decoded, non-empty
/// source exists.
pub fn render_export(
    source: Option<&ColorImage>,
    params: &ParameterState,
) -> Result<ColorImage, EditorError> {
    let source = source.ok_or(EditorError::ImageNotReady)?;
    let [width, height] = source.size;
    if width == 0 || height == 0 {
        return Err(EditorError::ImageNotReady);
    }
    Ok(render::render(source, params, 1.0))
}

pub fn encode(
    image: &ColorImage,
    format: ExportFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EditorError> {
    let rgba = to_rgba_image(image).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "image dimensions exceed u32")
    })?;
    let mut out = Cursor::new(Vec::new());
    match format {
        ExportFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, jpeg_quality.clamp(1, 100))
                .encode_image(&rgb)?;
        }
        _ => rgba.write_to(&mut out, format.image_format())?,
    }
    Ok(out.into_inner())
}

/// Render, encode, and write the edited image to `path`.
pub fn export_image(
    path: &Path,
    source: Option<&ColorImage>,
    params: &ParameterState,
    settings: &ExportSettings,
) -> Result<ExportSummary, EditorError> {
    let rendered = render_export(source, params)?;
    let (target, format) = resolve_target(path, settings.format)?;
    let bytes = encode(&rendered, format, settings.jpeg_quality)?;
    write_atomic(&target, &bytes)?;
    info!(
        path = %target.display(),
        format = format.label(),
        bytes = bytes.len(),
        "exported image"
    );
    Ok(ExportSummary {
        path: target,
        format,
        size: rendered.size,
        byte_len: bytes.len(),
    })
}

fn build_temp_path(target: &Path) -> PathBuf {
    let parent = target
        .parent()
        .map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf);
    let base = target
        .file_name()
        .map_or_else(|| "export".to_string(), |s| s.to_string_lossy().into_owned());
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mut candidate = parent.join(format!(".{base}.{nanos}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter = counter.wrapping_add(1);
        candidate = parent.join(format!(".{base}.{nanos}.{counter}.tmp"));
    }
    candidate
}

fn replace_file(tmp_path: &Path, target: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(tmp_path, target) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) && target.exists() =>
            {
                let _ = fs::remove_file(target);
                fs::rename(tmp_path, target)
            }
            Err(err) => Err(err),
        }
    }
    #[cfg(not(windows))]
    {
        fs::rename(tmp_path, target)
    }
}

/// Write through a sibling temp file so a failed export never leaves a
/// half-written target behind.
fn write_atomic(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = build_temp_path(target);
    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        replace_file(&tmp_path, target)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::FilterField;
    use egui::Color32;

    fn sample_image() -> ColorImage {
        ColorImage::new(
            [3, 2],
            vec![
                Color32::from_rgb(255, 0, 0),
                Color32::from_rgb(0, 255, 0),
                Color32::from_rgb(0, 0, 255),
                Color32::from_rgb(10, 10, 10),
                Color32::from_rgb(128, 128, 128),
                Color32::from_rgb(250, 250, 250),
            ],
        )
    }

    #[test]
    fn export_without_image_is_not_ready() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("edited-image.png");
        let err = export_image(
            &target,
            None,
            &ParameterState::default(),
            &ExportSettings::default(),
        )
        .expect_err("no source image");
        assert!(matches!(err, EditorError::ImageNotReady));
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).expect("list dir").count(), 0);
    }

    #[test]
    fn zero_sized_source_is_not_ready() {
        let empty = ColorImage::new([0, 0], Vec::new());
        let err = render_export(Some(&empty), &ParameterState::default())
            .expect_err("empty source");
        assert!(matches!(err, EditorError::ImageNotReady));
    }

    #[test]
    fn export_writes_rotated_png() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("edited-image.png");
        let mut params = ParameterState::default();
        params.rotate_right();
        let summary = export_image(
            &target,
            Some(&sample_image()),
            &params,
            &ExportSettings::default(),
        )
        .expect("export png");
        assert_eq!(summary.format, ExportFormat::Png);
        assert_eq!(summary.size, [2, 3]);

        let written = image::open(&target).expect("reopen export").to_rgba8();
        assert_eq!(written.dimensions(), (2, 3));
        // Clockwise turn puts the bottom-left pixel in the top-left corner.
        assert_eq!(written.get_pixel(0, 0).0, [10, 10, 10, 255]);
        assert_eq!(fs::read_dir(dir.path()).expect("list dir").count(), 1);
    }

    #[test]
    fn export_applies_filters() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("inverted.bmp");
        let params = ParameterState::default().with(FilterField::Inversion, 100.0);
        export_image(
            &target,
            Some(&sample_image()),
            &params,
            &ExportSettings::default(),
        )
        .expect("export bmp");
        let written = image::open(&target).expect("reopen export").to_rgba8();
        assert_eq!(written.get_pixel(0, 0).0, [0, 255, 255, 255]);
    }

    #[test]
    fn bare_name_gets_fallback_extension() {
        let (path, format) =
            resolve_target(Path::new("out/edited-image"), ExportFormat::Jpeg).expect("resolve");
        assert_eq!(path, Path::new("out/edited-image.jpg"));
        assert_eq!(format, ExportFormat::Jpeg);

        let (_, format) =
            resolve_target(Path::new("a.TIF"), ExportFormat::Png).expect("resolve upper case");
        assert_eq!(format, ExportFormat::Tiff);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = resolve_target(Path::new("edited.psd"), ExportFormat::Png)
            .expect_err("psd unsupported");
        assert!(matches!(err, EditorError::UnsupportedExportFormat(ext) if ext == "psd"));
    }

    #[test]
    fn jpeg_encoding_drops_alpha() {
        let bytes = encode(&sample_image(), ExportFormat::Jpeg, 80).expect("encode jpeg");
        let decoded = image::load_from_memory(&bytes).expect("decode jpeg");
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }
}

use chrono::{DateTime, Utc};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Where the current image came from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    File(PathBuf),
    Dropped { name: Option<String> },
    Clipboard,
}

/// Provenance and file facts for the image being edited.
#[derive(Debug, Clone)]
pub struct ImageMeta {
    pub source: ImageSource,
    pub byte_len: Option<u64>,
    pub last_modified: Option<SystemTime>,
    pub format: Option<ImageFormat>,
}

impl ImageMeta {
    pub fn from_path(path: &Path) -> Self {
        let (byte_len, last_modified) = std::fs::metadata(path)
            .map_or((None, None), |m| (Some(m.len()), m.modified().ok()));
        Self {
            source: ImageSource::File(path.to_owned()),
            byte_len,
            last_modified,
            format: None,
        }
    }

    pub fn dropped(
        name: Option<String>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    ) -> Self {
        Self {
            source: ImageSource::Dropped {
                name: name.filter(|s| !s.is_empty()),
            },
            byte_len: u64::try_from(byte_len).ok(),
            last_modified,
            format: None,
        }
    }

    pub const fn clipboard(byte_len: Option<u64>) -> Self {
        Self {
            source: ImageSource::Clipboard,
            byte_len,
            last_modified: None,
            format: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: Option<ImageFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn display_name(&self) -> String {
        match &self.source {
            ImageSource::File(path) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned()),
            ImageSource::Dropped { name } => name.clone().unwrap_or_else(|| "dropped image".into()),
            ImageSource::Clipboard => "clipboard image".into(),
        }
    }

    pub const fn source_label(&self) -> &'static str {
        match self.source {
            ImageSource::File(_) => "File",
            ImageSource::Dropped { .. } => "Drag & drop",
            ImageSource::Clipboard => "Clipboard",
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ImageSource::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn format_label(&self) -> &'static str {
        self.format
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("raw")
    }
}

/// Byte count with binary units, e.g. `1.50 MiB`.
pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

pub fn format_system_time(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_sizes_use_binary_units() {
        assert_eq!(human_readable_bytes(512), "512 B");
        assert_eq!(human_readable_bytes(1536), "1.50 KiB");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024), "3.00 MiB");
    }

    #[test]
    fn display_name_prefers_file_name() {
        let meta = ImageMeta::from_path(Path::new("/tmp/photos/cat.jpg"));
        assert_eq!(meta.display_name(), "cat.jpg");
        assert!(meta.path().is_some());

        let dropped = ImageMeta::dropped(Some(String::new()), 10, None);
        assert_eq!(dropped.display_name(), "dropped image");
        assert!(dropped.path().is_none());
    }

    #[test]
    fn format_label_uses_extension() {
        let meta = ImageMeta::clipboard(None).with_format(Some(ImageFormat::Jpeg));
        assert_eq!(meta.format_label(), "jpg");
        assert_eq!(ImageMeta::clipboard(None).format_label(), "raw");
    }
}

use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use egui::{Color32, Stroke};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::export::ExportFormat;

const CONFIG_FILE_NAME: &str = "pixtweak.toml";

fn alpha_to_u8(alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub thickness: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: [220, 70, 70],
            alpha: 1.0,
            thickness: 1.2,
        }
    }
}

impl StrokeStyle {
    pub fn color32(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.color[0],
            self.color[1],
            self.color[2],
            alpha_to_u8(self.alpha),
        )
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            width: self.thickness.max(0.1),
            color: self.color32(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub attention_highlight: StrokeStyle,
    pub image_limits: ImageLimits,
    pub preview: PreviewSettings,
    pub export: ExportSettings,
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => {
                        debug!(path = %path.display(), "loaded config");
                        return cfg;
                    }
                    Err(err) => {
                        warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    pub fn effective_export(&self) -> ExportSettings {
        self.export.sanitized()
    }

    pub fn preview_max_side(&self) -> u32 {
        self.preview.max_side.clamp(256, 8192)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Pixtweak", "Pixtweak") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("pixtweak").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}

/// Live preview is rendered from a copy no larger than `max_side` per side.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub max_side: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { max_side: 1600 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub file_stem: String,
    pub format: ExportFormat,
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_stem: "edited-image".to_string(),
            format: ExportFormat::Png,
            jpeg_quality: 90,
        }
    }
}

impl ExportSettings {
    pub fn sanitized(&self) -> Self {
        let stem: String = self
            .file_stem
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '/' | '\\' | ':' | '\0'))
            .collect();
        Self {
            file_stem: if stem.is_empty() {
                Self::default().file_stem
            } else {
                stem
            },
            format: self.format,
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
        }
    }

    /// Name offered in the save dialog, e.g. `edited-image.png`.
    pub fn default_file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = AppConfig::parse("").expect("parse empty config");
        assert_eq!(cfg.effective_export().default_file_name(), "edited-image.png");
        assert_eq!(cfg.preview_max_side(), 1600);
        assert_eq!(cfg.effective_image_limits().image_dim, 12_000);
    }

    #[test]
    fn partial_sections_override_fields() {
        let cfg = AppConfig::parse(
            r#"
            [export]
            file_stem = "holiday"
            format = "jpeg"
            jpeg_quality = 0

            [preview]
            max_side = 10
            "#,
        )
        .expect("parse config");
        let export = cfg.effective_export();
        assert_eq!(export.default_file_name(), "holiday.jpg");
        assert_eq!(export.jpeg_quality, 1);
        assert_eq!(cfg.preview_max_side(), 256);
    }

    #[test]
    fn file_stem_is_cleaned() {
        let settings = ExportSettings {
            file_stem: " ../out/ ".to_string(),
            ..ExportSettings::default()
        };
        assert_eq!(settings.sanitized().file_stem, "..out");

        let blank = ExportSettings {
            file_stem: "  ".to_string(),
            ..ExportSettings::default()
        };
        assert_eq!(blank.sanitized().file_stem, "edited-image");
    }

    #[test]
    fn attention_highlight_reads_its_section() {
        let default = AppConfig::parse("").expect("parse empty config");
        assert_eq!(default.attention_highlight.stroke().color, Color32::from_rgb(220, 70, 70));

        let cfg = AppConfig::parse(
            "[attention_highlight]\ncolor = [0, 0, 255]\nalpha = 4.0\nthickness = 0.0",
        )
        .expect("parse config");
        let stroke = cfg.attention_highlight.stroke();
        assert_eq!(stroke.color, Color32::from_rgb(0, 0, 255));
        assert!((stroke.width - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(AppConfig::parse("[export]\nformat = \"psd\"").is_err());
    }
}

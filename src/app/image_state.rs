use crate::image::{DecodedImage, ImageMeta};
use egui::{ColorImage, TextureHandle};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::SystemTime;

pub enum ImageLoadRequest {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

pub struct PendingImageTask {
    pub(super) rx: Receiver<ImageLoadResult>,
    pub(super) meta: PendingImageMeta,
}

pub enum ImageLoadResult {
    Success(DecodedImage),
    Error(String),
}

#[derive(Clone)]
pub enum PendingImageMeta {
    Path {
        path: PathBuf,
    },
    DroppedBytes {
        name: Option<String>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    },
}

impl PendingImageMeta {
    pub(super) fn description(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), str::to_string),
            Self::DroppedBytes { name, .. } => name
                .as_deref()
                .map_or_else(|| "dropped bytes".to_string(), str::to_string),
        }
    }

    pub(super) fn into_image_meta(self) -> ImageMeta {
        match self {
            Self::Path { path } => ImageMeta::from_path(&path),
            Self::DroppedBytes {
                name,
                byte_len,
                last_modified,
            } => ImageMeta::dropped(name, byte_len, last_modified),
        }
    }
}

/// The decoded source plus everything derived from it for display.
pub struct ImageState {
    /// Full-resolution pixels; export renders from these.
    pub(super) source: Option<ColorImage>,
    /// Downscaled copy the live preview renders from.
    pub(super) preview_base: Option<ColorImage>,
    pub(super) preview_scale: f32,
    pub(super) texture: Option<TextureHandle>,
    pub(super) preview_dirty: bool,
    pub(super) meta: Option<ImageMeta>,
    pub(super) pending: Option<PendingImageTask>,
}

impl Default for ImageState {
    fn default() -> Self {
        Self {
            source: None,
            preview_base: None,
            preview_scale: 1.0,
            texture: None,
            preview_dirty: false,
            meta: None,
            pending: None,
        }
    }
}

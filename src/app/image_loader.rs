use super::{EditorApp, ImageLoadRequest, ImageLoadResult, PendingImageMeta, PendingImageTask};
use crate::image::{ImageMeta, decode_image_from_bytes, decode_image_from_path, fit_within};
use egui::ColorImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::SystemTime;
use tracing::{info, warn};

impl EditorApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        self.last_image_dir = Some(parent_dir(&path));
        let meta = PendingImageMeta::Path { path: path.clone() };
        self.start_image_load(ImageLoadRequest::Path(path), meta);
    }

    pub(crate) fn start_loading_image_from_bytes(
        &mut self,
        name: Option<String>,
        bytes: Vec<u8>,
        last_modified: Option<SystemTime>,
    ) {
        let meta = PendingImageMeta::DroppedBytes {
            name,
            byte_len: bytes.len(),
            last_modified,
        };
        self.start_image_load(ImageLoadRequest::Bytes(bytes), meta);
    }

    fn start_image_load(&mut self, request: ImageLoadRequest, meta: PendingImageMeta) {
        let description = meta.description();
        let limits = self.config.effective_image_limits();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match request {
                ImageLoadRequest::Path(path) => decode_image_from_path(&limits, &path),
                ImageLoadRequest::Bytes(bytes) => decode_image_from_bytes(&limits, bytes),
            };
            let msg = match result {
                Ok(decoded) => ImageLoadResult::Success(decoded),
                Err(err) => ImageLoadResult::Error(format!("{err:#}")),
            };
            let _ = tx.send(msg);
        });
        // A newer request supersedes one still in flight.
        self.image.pending = Some(PendingImageTask { rx, meta });
        info!(source = %description, "loading image");
        self.set_status(format!("Loading {description}…"));
    }

    pub(crate) fn poll_image_loader(&mut self) {
        let Some(task) = self.image.pending.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success(decoded)) => {
                let meta = task.meta.into_image_meta().with_format(decoded.format);
                self.install_image(decoded.pixels, meta);
            }
            Ok(ImageLoadResult::Error(err)) => {
                let label = task.meta.description();
                warn!(source = %label, "image load failed: {err}");
                self.set_status(format!("Failed to load {label}: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.image.pending = Some(task);
            }
            Err(TryRecvError::Disconnected) => {
                let label = task.meta.description();
                warn!(source = %label, "image loader disconnected");
                self.set_status(format!("Loading {label} failed: worker disconnected."));
            }
        }
    }

    /// Replace the current image and start a fresh editing session for it.
    pub(crate) fn install_image(&mut self, pixels: ColorImage, meta: ImageMeta) {
        let [width, height] = pixels.size;
        let (preview_base, preview_scale) = fit_within(&pixels, self.config.preview_max_side());
        self.image.source = Some(pixels);
        self.image.preview_base = Some(preview_base);
        self.image.preview_scale = preview_scale;
        self.image.preview_dirty = true;
        let name = meta.display_name();
        self.image.meta = Some(meta);
        self.session.begin_image();
        info!(name = %name, width, height, preview_scale, "image ready");
        self.set_status(format!("Loaded {name} ({width}×{height})"));
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

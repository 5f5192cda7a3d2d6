use super::{EditorApp, NativeDialog};
use crate::error::EditorError;
use crate::export::{self, ExportFormat};
use crate::image::human_readable_bytes;
use std::path::{Path, PathBuf};

impl EditorApp {
    /// Open the save dialog, or report why there is nothing to save.
    pub(crate) fn start_export(&mut self) {
        if !self.is_image_ready() {
            self.report_error("Save", &EditorError::ImageNotReady);
            return;
        }
        let settings = self.config.effective_export();
        let mut extensions = vec![settings.format.extension()];
        extensions.extend(
            ExportFormat::ALL
                .into_iter()
                .map(ExportFormat::extension)
                .filter(|ext| *ext != settings.format.extension()),
        );
        let mut dialog = Self::make_save_dialog(
            "Save edited image",
            &settings.default_file_name(),
            &extensions,
            self.last_export_dir.as_deref(),
        );
        dialog.save_file();
        self.active_dialog = Some(NativeDialog::SaveImage(dialog));
    }

    pub(crate) fn handle_export(&mut self, path: &Path) {
        // A newer image is still decoding; saving now would write the old one.
        if self.image.pending.is_some() {
            self.report_error("Save", &EditorError::ImageNotReady);
            return;
        }
        let settings = self.config.effective_export();
        match export::export_image(
            path,
            self.image.source.as_ref(),
            self.session.params(),
            &settings,
        ) {
            Ok(summary) => {
                self.last_export_dir = summary.path.parent().map(Path::to_path_buf);
                let name = summary.path.file_name().map_or_else(
                    || summary.path.display().to_string(),
                    |s| s.to_string_lossy().into_owned(),
                );
                let [w, h] = summary.size;
                let bytes =
                    human_readable_bytes(u64::try_from(summary.byte_len).unwrap_or(u64::MAX));
                self.set_status(format!(
                    "Saved {name} ({}, {w}×{h}, {bytes})",
                    summary.format.label()
                ));
            }
            Err(err) => {
                self.last_export_dir = path.parent().map(PathBuf::from);
                self.report_error("Save failed", &err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageMeta;
    use egui::{Color32, ColorImage};

    fn app_with_image() -> EditorApp {
        let mut app = EditorApp::default();
        app.install_image(
            ColorImage::new([2, 2], vec![Color32::WHITE; 4]),
            ImageMeta::clipboard(None),
        );
        app
    }

    #[test]
    fn save_and_edits_wait_for_a_pending_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with_image();
        app.start_loading_image_from_path(dir.path().join("next.png"));
        assert!(!app.is_image_ready());

        app.start_export();
        assert!(app.active_dialog.is_none());

        let target = dir.path().join("edited-image.png");
        app.handle_export(&target);
        assert!(!target.exists());
        let status = app.ui.last_status.clone().unwrap_or_default();
        assert!(status.contains("not fully loaded"), "{status}");

        app.rotate_image(true);
        app.flip_image(true);
        app.set_active_filter(150.0);
        assert!(app.session.params().is_identity());
        assert_eq!(app.session.history().len(), 1);
    }

    #[test]
    fn saved_status_reports_size_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with_image();
        let target = dir.path().join("edited-image.png");
        app.handle_export(&target);

        let written = std::fs::metadata(&target).expect("exported file").len();
        let status = app.ui.last_status.clone().unwrap_or_default();
        assert!(status.starts_with("Saved edited-image.png"), "{status}");
        assert!(status.contains(&human_readable_bytes(written)), "{status}");
    }
}

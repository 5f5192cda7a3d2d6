use super::super::{EditorApp, NativeDialog};
use egui_file_dialog::FileDialog;
use std::path::Path;

impl EditorApp {
    pub(crate) fn open_image_dialog(&mut self) {
        let mut dialog = Self::make_open_dialog(self.last_image_dir.as_deref());
        dialog.pick_file();
        self.active_dialog = Some(NativeDialog::Open(dialog));
    }

    pub(crate) fn make_open_dialog(initial_dir: Option<&Path>) -> FileDialog {
        // Keep in sync with enabled `image` crate features.
        let mut dialog = FileDialog::new()
            .title("Open image")
            .add_file_filter_extensions(
                "All images",
                vec![
                    "png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "tga", "tiff", "tif", "pnm",
                    "pbm", "pgm", "ppm",
                ],
            )
            .add_file_filter_extensions("PNG", vec!["png"])
            .add_file_filter_extensions("JPEG/JPG", vec!["jpg", "jpeg"])
            .add_file_filter_extensions("WebP", vec!["webp"])
            .default_file_filter("All images");
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    /// Save dialog offering one `*.ext` entry per extension; the first is the default.
    pub(crate) fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        for ext in extensions {
            dialog = dialog.add_save_extension(&format!("*.{ext}"), ext);
        }
        if let Some(first) = extensions.first() {
            dialog = dialog.default_save_extension(&format!("*.{first}"));
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }
}

mod app;
mod config;
mod edit;
mod error;
mod export;
mod image;
mod render;

use app::EditorApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixtweak=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> eframe::Result<()> {
    init_logging();
    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting pixtweak");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Pixtweak Image Editor",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(EditorApp::new_with_initial_path(
                &cc.egui_ctx,
                initial_image_path.as_deref(),
            )))
        }),
    )
}

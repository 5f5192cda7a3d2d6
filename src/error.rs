use thiserror::Error;

/// Failures surfaced at the editor's UI boundary.
///
/// None of these touch the parameter state or history; callers report them
/// and carry on.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Image not fully loaded")]
    ImageNotReady,

    #[error("Unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// Whether the user should see this as a failure rather than a notice.
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::NoFileSelected)
    }
}

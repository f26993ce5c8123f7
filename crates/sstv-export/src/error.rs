//! Error types for sstv-export.

use std::io;
use thiserror::Error;

/// Export error type.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No encoding mode was selected.
    #[error("No SSTV encoder selected")]
    MissingEncoder,

    /// The encoder rejected the image or produced an unusable schedule.
    #[error("Encoder error: {0}")]
    Encoder(#[from] sstv_core::Error),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error during encoding or file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

// Convert hound's error type to a simple I/O error at the API boundary.
impl From<hound::Error> for ExportError {
    fn from(e: hound::Error) -> Self {
        ExportError::Io(io::Error::other(e))
    }
}

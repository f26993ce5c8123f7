//! Error types for sstv-core.

use thiserror::Error;

/// Error type for sstv-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No SSTV encoder selected")]
    MissingEncoder,

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("Invalid schedule: signal ends at {end}s, before its start at {start}s")]
    InvalidSchedule { start: f64, end: f64 },

    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[error("Audio device not available")]
    DeviceNotAvailable(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to play audio stream")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Failed to enumerate devices")]
    DevicesError(#[from] cpal::DevicesError),

    #[error("Failed to get device name")]
    DeviceNameError(#[from] cpal::DeviceNameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

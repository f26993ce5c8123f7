//! The encoder contract consumed by both the live and offline paths.
//!
//! Mode-specific SSTV logic (the pixel-to-tone frequency tables) lives behind
//! [`SstvEncoder`]; this crate only drives the resulting schedule.

use crate::Result;

/// Raw RGBA pixel buffer handed to an encoder.
///
/// Shape validation (expected dimensions for the mode, buffer length) is the
/// encoder's concern, surfaced through [`SstvEncoder::prepare_image`].
#[derive(Debug, Clone)]
pub struct PixelData {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGBA bytes, row-major, `width * height * 4` long.
    pub rgba: Vec<u8>,
}

impl PixelData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// Scheduling surface of a tone-generating unit.
///
/// Encoders emit their signal as a series of frequency changes at absolute
/// timeline positions (seconds). The sink applies them sample-accurately.
pub trait ToneSink {
    /// Schedule the tone frequency to become `hz` at time `at` (seconds).
    fn set_frequency(&mut self, at: f64, hz: f64);
}

/// An SSTV mode encoder.
///
/// Implementations map a prepared image to a frequency schedule. [`encode`]
/// must be deterministic for fixed pixel data and start time, and is called
/// at most once per rendering session.
///
/// [`encode`]: SstvEncoder::encode
pub trait SstvEncoder: Send {
    /// Display label for the mode, used for export filenames.
    fn mode_name(&self) -> &str;

    /// Validate and ingest a raw pixel buffer.
    fn prepare_image(&mut self, pixels: &PixelData) -> Result<()>;

    /// Emit the frequency schedule beginning at `start_time` and return the
    /// absolute time (seconds) at which the signal concludes.
    fn encode(&self, sink: &mut dyn ToneSink, start_time: f64) -> f64;

    /// Total signal duration in seconds, computable without rendering.
    fn encoded_length(&self) -> f64;
}

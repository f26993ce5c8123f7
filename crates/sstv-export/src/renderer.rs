//! Offline renderer for SSTV export.
//!
//! Renders an encoder's full schedule into an in-memory sample buffer as
//! fast as possible, with no real-time constraints. The format constants
//! below are invariants of the export path, not options.

use crate::error::{ExportError, Result};
use sstv_core::{FrequencySchedule, PixelData, SstvEncoder, ToneGenerator, LEAD_IN_SECS};

/// Export sample rate in Hz.
pub const SAMPLE_RATE: u32 = 48_000;
/// Export bit depth.
pub const BITS_PER_SAMPLE: u16 = 16;
/// Export channel count (mono).
pub const CHANNELS: u16 = 1;

/// Render block size in samples.
const BLOCK_SIZE: usize = 1024;

/// Progress callback for render operations (0.0 to 1.0).
pub type RenderProgressCallback = Box<dyn Fn(f32) + Send>;

/// Result of an offline render.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Mono audio data, normalized to `[-1, 1]`.
    pub samples: Vec<f32>,
    /// Sample rate of the rendered audio.
    pub sample_rate: u32,
    /// Peak level (linear).
    pub peak_level: f32,
    /// Number of samples rendered.
    pub length_samples: usize,
}

impl RenderResult {
    /// Get duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.length_samples as f64 / self.sample_rate as f64
    }
}

/// Offline SSTV renderer.
///
/// Runs fully decoupled from any live session: it builds its own tone
/// generator and never touches the shared audio-output resource, so it is
/// safe to invoke while playback is running. There is no mid-render
/// cancellation; the render runs to completion or fails.
#[derive(Debug, Default)]
pub struct OfflineRenderer;

impl OfflineRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the encoder's schedule to a sample buffer.
    ///
    /// The buffer covers the encoder's reported length plus the fixed
    /// lead-in, sized `round(48000 × duration)` mono samples.
    pub fn render(
        &self,
        pixels: &PixelData,
        encoder: Option<&mut dyn SstvEncoder>,
        progress: Option<RenderProgressCallback>,
    ) -> Result<RenderResult> {
        let encoder = match encoder {
            Some(encoder) => encoder,
            None => {
                log::error!("SSTV encoder is not selected");
                return Err(ExportError::MissingEncoder);
            }
        };

        encoder.prepare_image(pixels)?;

        let duration = encoder.encoded_length() + LEAD_IN_SECS;
        let total_samples = (SAMPLE_RATE as f64 * duration).round() as usize;

        let start_time = LEAD_IN_SECS;
        let mut schedule = FrequencySchedule::new();
        let end_time = encoder.encode(&mut schedule, start_time);
        if end_time < start_time {
            return Err(ExportError::Render(format!(
                "schedule ends at {end_time}s, before its start at {start_time}s"
            )));
        }
        log::debug!(
            "Rendering {} signal: {:.2}s",
            encoder.mode_name(),
            end_time - start_time
        );

        let mut tone = ToneGenerator::new(schedule, start_time, end_time, SAMPLE_RATE as f64);
        let mut samples = vec![0.0f32; total_samples];

        let mut rendered = 0;
        for block in samples.chunks_mut(BLOCK_SIZE) {
            tone.process(block);
            rendered += block.len();
            if let Some(ref callback) = progress {
                callback(rendered as f32 / total_samples as f32);
            }
        }

        let peak_level = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        Ok(RenderResult {
            samples,
            sample_rate: SAMPLE_RATE,
            peak_level,
            length_samples: total_samples,
        })
    }
}

//! Offline SSTV rendering and WAV export.
//!
//! Renders an encoder's frequency schedule faster than real time and
//! serializes the result as a canonical 48 kHz / 16-bit / mono WAV byte
//! stream, completely decoupled from live playback.
//!
//! # Example
//!
//! ```ignore
//! use sstv_export::render_to_artifact;
//!
//! let artifact = render_to_artifact(&pixels, Some(&mut encoder))?;
//! artifact.write_to_dir(std::path::Path::new("."))?;
//! ```

pub mod artifact;
pub mod error;
pub mod handle;
pub mod renderer;
pub mod wav;

pub use artifact::{export_filename, ExportArtifact};
pub use error::{ExportError, Result};
pub use handle::{ExportHandle, ExportStatus};
pub use renderer::{
    OfflineRenderer, RenderProgressCallback, RenderResult, BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE,
};
pub use wav::{encode_wav_mono_memory, quantize_i16};

use sstv_core::{PixelData, SstvEncoder};

/// Render the encoded signal and serialize it as a named WAV artifact.
///
/// Blocks until the render completes. The artifact's filename is stamped
/// with the completion time and the encoder's mode name.
pub fn render_to_artifact(
    pixels: &PixelData,
    encoder: Option<&mut dyn SstvEncoder>,
) -> Result<ExportArtifact> {
    render_to_artifact_with_progress(pixels, encoder, None)
}

/// [`render_to_artifact`] with a render progress callback.
pub fn render_to_artifact_with_progress(
    pixels: &PixelData,
    encoder: Option<&mut dyn SstvEncoder>,
    progress: Option<RenderProgressCallback>,
) -> Result<ExportArtifact> {
    let encoder = match encoder {
        Some(encoder) => encoder,
        None => {
            log::error!("SSTV encoder is not selected");
            return Err(ExportError::MissingEncoder);
        }
    };

    let result = OfflineRenderer::new().render(pixels, Some(&mut *encoder), progress)?;
    let bytes = encode_wav_mono_memory(&result.samples)?;
    let filename = export_filename(encoder.mode_name(), chrono::Local::now());
    log::info!(
        "Exported {} ({:.2}s, {} bytes)",
        filename,
        result.duration_seconds(),
        bytes.len()
    );

    Ok(ExportArtifact { filename, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sstv_core::ToneSink;

    struct ConstantToneEncoder;

    impl SstvEncoder for ConstantToneEncoder {
        fn mode_name(&self) -> &str {
            "Robot 36"
        }

        fn prepare_image(&mut self, _pixels: &PixelData) -> sstv_core::Result<()> {
            Ok(())
        }

        fn encode(&self, sink: &mut dyn ToneSink, start_time: f64) -> f64 {
            sink.set_frequency(start_time, 1200.0);
            start_time + 0.1
        }

        fn encoded_length(&self) -> f64 {
            0.1
        }
    }

    #[test]
    fn test_artifact_has_wav_header_and_mode_filename() {
        let pixels = PixelData::new(2, 2, vec![0; 16]);
        let mut encoder = ConstantToneEncoder;

        let artifact = render_to_artifact(&pixels, Some(&mut encoder)).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"RIFF");
        // 1.1 s at 48 kHz, 2 bytes per sample, plus the 44-byte header.
        assert_eq!(artifact.bytes.len(), 44 + 52_800 * 2);
        assert!(artifact.filename.ends_with("_SSTV_Robot36.wav"));
    }

    #[test]
    fn test_missing_encoder_is_rejected() {
        let pixels = PixelData::new(2, 2, vec![0; 16]);
        let result = render_to_artifact(&pixels, None);
        assert!(matches!(result, Err(ExportError::MissingEncoder)));
    }
}

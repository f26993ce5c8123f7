//! WAV serialization using hound.
//!
//! Output is always the canonical single-channel PCM layout: a fixed
//! 44-byte RIFF/WAVE header followed by 16-bit signed little-endian samples
//! at 48 kHz.

use crate::error::Result;
use crate::renderer::{BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
use hound::{SampleFormat, WavSpec, WavWriter};

/// Quantize a normalized sample to 16-bit signed.
///
/// Saturating: inputs outside `[-1, 1]` clamp to ±32767, never wrap.
#[inline]
pub fn quantize_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Encode mono samples to an in-memory WAV byte stream.
pub fn encode_wav_mono_memory(samples: &[f32]) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut buffer = Vec::with_capacity(44 + samples.len() * 2);
    {
        let cursor = std::io::Cursor::new(&mut buffer);
        let mut writer = WavWriter::new(cursor, spec)?;

        for &sample in samples {
            writer.write_sample(quantize_i16(sample))?;
        }

        // Finalize patches the header sizes and flushes.
        writer.finalize()?;
    }

    Ok(buffer)
}

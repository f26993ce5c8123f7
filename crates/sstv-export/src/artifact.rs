//! The downloadable export artifact and its filename convention.

use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A serialized WAV file ready for persistence.
///
/// Header and quantized samples are already concatenated; ownership ends
/// when the artifact is handed to the caller. Download triggers, file
/// writes and uploads are external concerns.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Suggested filename, `{YYYYMMDD}-{HHMMSS}_SSTV_{Mode}.wav`.
    pub filename: String,
    /// Complete WAV byte stream (44-byte header + 16-bit PCM data).
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Convenience: write the artifact into `dir` under its own filename.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(&self.bytes)?;
        Ok(path)
    }
}

/// Derive the artifact filename from the encoder's mode name and a
/// timestamp taken at export completion. Whitespace is stripped from the
/// mode name.
pub fn export_filename(mode_name: &str, at: DateTime<Local>) -> String {
    let mode: String = mode_name.split_whitespace().collect();
    format!("{}_SSTV_{}.wav", at.format("%Y%m%d-%H%M%S"), mode)
}

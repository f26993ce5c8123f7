//! Non-blocking export with progress polling.

use crate::artifact::ExportArtifact;
use crate::error::{ExportError, Result};
use crossbeam_channel::Receiver;
use sstv_core::{PixelData, SstvEncoder};
use std::thread::JoinHandle;

/// Status of a background export operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportStatus {
    /// No progress yet (just started).
    Pending,
    /// Render in progress, fraction in `[0, 1]`.
    Running(f32),
    /// The export thread finished; call [`ExportHandle::wait`] to take the
    /// artifact or the error.
    Finished,
}

/// Handle to an export running on a dedicated thread.
///
/// Poll [`progress`] each frame, then [`wait`] for the artifact. There is
/// no mid-render cancellation: dropping the handle detaches the thread and
/// the render runs to completion.
///
/// # Example
/// ```ignore
/// let mut export = ExportHandle::spawn(pixels, Box::new(encoder));
/// loop {
///     match export.progress() {
///         ExportStatus::Running(p) => println!("{:.0}%", p * 100.0),
///         ExportStatus::Finished => break,
///         ExportStatus::Pending => {}
///     }
/// }
/// let artifact = export.wait()?;
/// ```
///
/// [`progress`]: ExportHandle::progress
/// [`wait`]: ExportHandle::wait
pub struct ExportHandle {
    progress_rx: Receiver<f32>,
    thread: Option<JoinHandle<Result<ExportArtifact>>>,
    last_progress: Option<f32>,
}

impl ExportHandle {
    /// Start a background export of the encoded signal.
    pub fn spawn(pixels: PixelData, mut encoder: Box<dyn SstvEncoder>) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(64);

        let thread = std::thread::Builder::new()
            .name("sstv-export".into())
            .spawn(move || {
                crate::render_to_artifact_with_progress(
                    &pixels,
                    Some(encoder.as_mut()),
                    Some(Box::new(move |p| {
                        let _ = tx.try_send(p); // drop if full, the UI will catch up
                    })),
                )
            })
            .expect("failed to spawn export thread");

        Self {
            progress_rx: rx,
            thread: Some(thread),
            last_progress: None,
        }
    }

    /// Poll for the latest export progress (non-blocking).
    ///
    /// Drains all pending progress messages and returns the latest one.
    pub fn progress(&mut self) -> ExportStatus {
        while let Ok(p) = self.progress_rx.try_recv() {
            self.last_progress = Some(p);
        }

        match &self.thread {
            None => ExportStatus::Finished,
            Some(thread) if thread.is_finished() => ExportStatus::Finished,
            Some(_) => match self.last_progress {
                Some(p) => ExportStatus::Running(p),
                None => ExportStatus::Pending,
            },
        }
    }

    /// Check if the export has finished (non-blocking).
    pub fn is_done(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }

    /// Block until the export finishes and take the artifact.
    pub fn wait(mut self) -> Result<ExportArtifact> {
        match self.thread.take() {
            Some(thread) => match thread.join() {
                Ok(result) => result,
                Err(_) => Err(ExportError::Render("Export thread panicked".into())),
            },
            None => Err(ExportError::Render("Export result already taken".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sstv_core::ToneSink;

    struct ConstantToneEncoder;

    impl SstvEncoder for ConstantToneEncoder {
        fn mode_name(&self) -> &str {
            "Constant"
        }

        fn prepare_image(&mut self, _pixels: &PixelData) -> sstv_core::Result<()> {
            Ok(())
        }

        fn encode(&self, sink: &mut dyn ToneSink, start_time: f64) -> f64 {
            sink.set_frequency(start_time, 1500.0);
            start_time + 0.05
        }

        fn encoded_length(&self) -> f64 {
            0.05
        }
    }

    #[test]
    fn test_background_export_yields_artifact() {
        let pixels = PixelData::new(2, 2, vec![0; 16]);
        let handle = ExportHandle::spawn(pixels, Box::new(ConstantToneEncoder));

        let artifact = handle.wait().unwrap();
        // 1.05 s at 48 kHz, 2 bytes per sample, plus the 44-byte header.
        assert_eq!(artifact.bytes.len(), 44 + 50_400 * 2);
        assert!(artifact.filename.ends_with("_SSTV_Constant.wav"));
    }

    #[test]
    fn test_progress_reports_finished_after_join_point() {
        let pixels = PixelData::new(2, 2, vec![0; 16]);
        let mut handle = ExportHandle::spawn(pixels, Box::new(ConstantToneEncoder));

        // Spin until the thread completes; every observation on the way must
        // be a valid status.
        loop {
            match handle.progress() {
                ExportStatus::Pending => {}
                ExportStatus::Running(p) => assert!((0.0..=1.0).contains(&p)),
                ExportStatus::Finished => break,
            }
            std::thread::yield_now();
        }
        assert!(handle.is_done());
        assert!(handle.wait().is_ok());
    }
}

//! SSTV playback system: mutex-wrapped scheduler facade.

use crate::encoder::{PixelData, SstvEncoder};
use crate::output::{CpalOutput, OutputBackend};
use crate::scheduler::{SignalScheduler, StartOutcome};
use crate::Result;
use parking_lot::Mutex;

/// Live playback entry point.
///
/// Wraps the [`SignalScheduler`] behind a mutex so UI threads can share one
/// system. All concurrency control beyond that lives in the scheduler's
/// superseding-start rule.
///
/// # Example
/// ```ignore
/// let system = SstvSystem::builder().build()?;
///
/// match system.start_playback(&pixels, Some(&mut encoder))? {
///     StartOutcome::Started { duration, mut handle } => {
///         // poll handle once per frame
///     }
///     StartOutcome::Stopped => {}
/// }
/// ```
pub struct SstvSystem {
    scheduler: Mutex<SignalScheduler>,
}

impl SstvSystem {
    pub fn builder() -> SstvSystemBuilder {
        SstvSystemBuilder::default()
    }

    /// See [`SignalScheduler::start_playback`].
    pub fn start_playback(
        &self,
        pixels: &PixelData,
        encoder: Option<&mut dyn SstvEncoder>,
    ) -> Result<StartOutcome> {
        self.scheduler.lock().start_playback(pixels, encoder)
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.lock().is_playing()
    }

    /// List available output devices.
    pub fn list_output_devices() -> Result<Vec<String>> {
        CpalOutput::list_devices()
    }
}

/// Builder for [`SstvSystem`].
#[derive(Default)]
pub struct SstvSystemBuilder {
    device_index: Option<usize>,
    backend: Option<Box<dyn OutputBackend>>,
}

impl SstvSystemBuilder {
    /// Select an output device by index (see
    /// [`SstvSystem::list_output_devices`]).
    pub fn device(mut self, index: usize) -> Self {
        self.device_index = Some(index);
        self
    }

    /// Inject a custom output backend instead of CPAL.
    pub fn output_backend(mut self, backend: Box<dyn OutputBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<SstvSystem> {
        let backend = match self.backend {
            Some(backend) => backend,
            None => Box::new(CpalOutput::with_device(self.device_index)?),
        };

        Ok(SstvSystem {
            scheduler: Mutex::new(SignalScheduler::new(backend)),
        })
    }
}

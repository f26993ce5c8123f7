//! Live SSTV playback: encoder contract, tone scheduling, CPAL output.
//!
//! # Primary API
//!
//! - [`SstvSystem`] / [`SstvSystemBuilder`]: main entry point
//! - [`SstvEncoder`] / [`ToneSink`]: the mode-encoder contract
//! - [`StartOutcome`] / [`PlaybackHandle`]: session lifecycle and progress
//!
//! One session is live at a time: a start request while a session plays
//! cancels it instead of stacking a second one. Progress is polled per UI
//! frame through the [`PlaybackHandle`] returned on start.
//!
//! # Example
//!
//! ```ignore
//! use sstv_core::{SstvSystem, StartOutcome, ProgressUpdate};
//!
//! let system = SstvSystem::builder().build()?;
//! if let StartOutcome::Started { mut handle, .. } =
//!     system.start_playback(&pixels, Some(&mut encoder))?
//! {
//!     loop {
//!         match handle.poll() {
//!             ProgressUpdate::Playing(p) => println!("{:.0}%", p * 100.0),
//!             update => break, // Complete or Cancelled
//!         }
//!     }
//! }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod encoder;
pub use encoder::{PixelData, SstvEncoder, ToneSink};

pub mod tone;
pub use tone::{FrequencySchedule, ToneEvent, ToneGenerator, LEAD_IN_SECS};

pub mod output;
pub use output::{CpalOutput, OutputBackend, OutputStream};

pub(crate) mod lockfree;
pub use lockfree::{AtomicDouble, AtomicFlag};

mod scheduler;
pub use scheduler::{SignalScheduler, StartOutcome};

mod progress;
pub use progress::{PlaybackHandle, ProgressUpdate};

mod system;
pub use system::{SstvSystem, SstvSystemBuilder};

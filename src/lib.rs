//! # SSTV - Slow-Scan Television signal engine
//!
//! Encodes images into audible SSTV signals, plays them through the system
//! audio output, and exports them as WAV files.
//!
//! ## Architecture
//!
//! An umbrella crate that coordinates:
//! - **sstv-core** - Encoder contract, tone generation, live playback
//!   (signal scheduler, progress reporting)
//! - **sstv-export** - Offline rendering and WAV serialization
//!
//! ## Quick Start
//!
//! ```ignore
//! use sstv::prelude::*;
//!
//! let system = SstvSystem::builder().build()?;
//!
//! // Toggle playback: a second call while a signal is live stops it.
//! match system.start_playback(&pixels, Some(&mut encoder))? {
//!     StartOutcome::Started { duration, mut handle } => {
//!         println!("transmitting for {duration:.1}s");
//!         while !handle.poll().is_terminal() {}
//!     }
//!     StartOutcome::Stopped => println!("stopped"),
//! }
//!
//! // Offline export, independent of playback.
//! let artifact = sstv::export::render_to_artifact(&pixels, Some(&mut encoder))?;
//! artifact.write_to_dir(std::path::Path::new("."))?;
//! ```

/// Re-export of sstv-core for direct access
pub use sstv_core as core;

// Core types
pub use sstv_core::{
    // Encoder contract
    FrequencySchedule,
    PixelData,
    SstvEncoder,
    ToneEvent,
    ToneGenerator,
    ToneSink,
    LEAD_IN_SECS,

    // Live playback
    PlaybackHandle,
    ProgressUpdate,
    SstvSystem,
    SstvSystemBuilder,
    StartOutcome,

    // Output backend seam
    CpalOutput,
    OutputBackend,
    OutputStream,

    // Error
    Error,
    Result,
};

/// Re-export of sstv-export for direct access
pub use sstv_export as export;

pub use sstv_export::{
    render_to_artifact, ExportArtifact, ExportError, ExportHandle, ExportStatus, OfflineRenderer,
    RenderResult,
};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        PixelData, ProgressUpdate, SstvEncoder, SstvSystem, SstvSystemBuilder, StartOutcome,
    };

    pub use crate::export::{render_to_artifact, ExportArtifact, ExportHandle};
}

//! Signal scheduler: drives one tone generator per session and enforces
//! single-session exclusivity.
//!
//! Exactly one session may be live at a time. A start request while a
//! session is live does not queue a second one; its sole effect is to cancel
//! the running session (toggle semantics). A naturally finished session is
//! released, together with its output stream, as soon as the scheduler
//! observes the finish flag.

use crate::encoder::{PixelData, SstvEncoder};
use crate::lockfree::{AtomicDouble, AtomicFlag};
use crate::output::{OutputBackend, OutputStream};
use crate::progress::PlaybackHandle;
use crate::tone::{FrequencySchedule, ToneGenerator, LEAD_IN_SECS};
use crate::{Error, Result};
use std::sync::Arc;

/// Timeline of one playback session, shared between the scheduler, the tone
/// generator on the audio thread, and the progress handle.
#[derive(Debug)]
pub(crate) struct SessionShared {
    pub(crate) start_time: f64,
    pub(crate) end_time: f64,
    pub(crate) elapsed: Arc<AtomicDouble>,
    pub(crate) cancelled: Arc<AtomicFlag>,
    pub(crate) finished: Arc<AtomicFlag>,
}

/// Result of a start request.
#[derive(Debug)]
pub enum StartOutcome {
    /// A new session began; `duration` is `end_time - start_time` in
    /// seconds, excluding the lead-in.
    Started {
        duration: f64,
        handle: PlaybackHandle,
    },
    /// A session was already live; it has been cancelled and nothing new
    /// was started.
    Stopped,
}

struct ActiveSession {
    shared: Arc<SessionShared>,
    // Dropping the stream stops and releases the audio-output resource.
    _stream: Box<dyn OutputStream>,
}

enum PlaybackState {
    Idle,
    Playing(ActiveSession),
}

/// Drives a tone generator through an encoder's schedule on an output
/// backend, one session at a time.
pub struct SignalScheduler {
    backend: Box<dyn OutputBackend>,
    state: PlaybackState,
}

impl SignalScheduler {
    pub fn new(backend: Box<dyn OutputBackend>) -> Self {
        Self {
            backend,
            state: PlaybackState::Idle,
        }
    }

    /// Whether a session is currently live (started and neither cancelled
    /// nor naturally finished). Observing a finished session releases it.
    pub fn is_playing(&mut self) -> bool {
        self.reap_finished();
        matches!(self.state, PlaybackState::Playing(_))
    }

    /// Release the session state, and with it the audio-output stream, once
    /// the tone generator has raised the finish flag.
    fn reap_finished(&mut self) {
        if let PlaybackState::Playing(session) = &self.state {
            if session.shared.finished.get() {
                self.state = PlaybackState::Idle;
                log::info!("Playback ended");
            }
        }
    }

    /// Start playback of the encoded signal, or cancel the live session.
    ///
    /// With no live session: prepares the image, obtains the frequency
    /// schedule starting at `now + lead-in`, starts the output stream and
    /// returns [`StartOutcome::Started`] with a [`PlaybackHandle`] for
    /// progress polling.
    ///
    /// With a live session: cancels it, releases the output resource and
    /// returns [`StartOutcome::Stopped`] without starting a new session.
    pub fn start_playback(
        &mut self,
        pixels: &PixelData,
        encoder: Option<&mut dyn SstvEncoder>,
    ) -> Result<StartOutcome> {
        let encoder = match encoder {
            Some(encoder) => encoder,
            None => {
                log::error!("SSTV encoder is not selected");
                return Err(Error::MissingEncoder);
            }
        };

        self.reap_finished();
        if let PlaybackState::Playing(session) =
            std::mem::replace(&mut self.state, PlaybackState::Idle)
        {
            session.shared.cancelled.set(true);
            drop(session);
            log::info!("Stopped previous signal");
            return Ok(StartOutcome::Stopped);
        }

        encoder.prepare_image(pixels)?;

        // The stream's timeline starts at zero when it is built, so "now"
        // is the origin and the signal begins one lead-in later.
        let start_time = LEAD_IN_SECS;
        let mut schedule = FrequencySchedule::new();
        let end_time = encoder.encode(&mut schedule, start_time);
        if end_time < start_time {
            return Err(Error::InvalidSchedule {
                start: start_time,
                end: end_time,
            });
        }

        let sample_rate = self.backend.sample_rate();
        let tone = ToneGenerator::new(schedule, start_time, end_time, sample_rate);
        let shared = Arc::new(SessionShared {
            start_time,
            end_time,
            elapsed: tone.elapsed(),
            cancelled: tone.cancelled(),
            finished: tone.finished(),
        });

        let stream = self.backend.start(tone)?;
        let duration = end_time - start_time;
        log::info!(
            "Started {} signal: {:.2}s after {:.0}s lead-in",
            encoder.mode_name(),
            duration,
            LEAD_IN_SECS
        );

        let handle = PlaybackHandle::new(Arc::clone(&shared));
        self.state = PlaybackState::Playing(ActiveSession {
            shared,
            _stream: stream,
        });

        Ok(StartOutcome::Started { duration, handle })
    }
}

//! Frequency schedule and the sample-accurate sine tone generator.

use crate::encoder::ToneSink;
use crate::lockfree::{AtomicDouble, AtomicFlag};
use std::f64::consts::TAU;
use std::sync::Arc;

/// Fixed scheduling lead-in (seconds) applied before the signal starts, so
/// that stream setup completes before audio must play. Shared by the live
/// and offline paths.
pub const LEAD_IN_SECS: f64 = 1.0;

/// A single frequency change at an absolute timeline position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    /// Timeline position in seconds.
    pub at: f64,
    /// Frequency in Hz from `at` onward.
    pub hz: f64,
}

/// Ordered frequency-change timeline produced by an encoder.
///
/// Events are kept sorted by time; insertion is stable for equal times, so
/// the last event an encoder emits for a given instant wins during playback.
#[derive(Debug, Default, Clone)]
pub struct FrequencySchedule {
    events: Vec<ToneEvent>,
}

impl FrequencySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ToneEvent] {
        &self.events
    }

    fn into_events(self) -> Vec<ToneEvent> {
        self.events
    }
}

impl ToneSink for FrequencySchedule {
    fn set_frequency(&mut self, at: f64, hz: f64) {
        let event = ToneEvent { at, hz };
        // Encoders emit in time order; keep the common case a push.
        match self.events.last() {
            Some(last) if last.at > at => {
                let idx = self.events.partition_point(|e| e.at <= at);
                self.events.insert(idx, event);
            }
            _ => self.events.push(event),
        }
    }
}

/// Pure sine source driven by a [`FrequencySchedule`].
///
/// Silent before `start_time` and from `end_time` on; phase-continuous
/// across frequency changes; unit amplitude. The generator shares three
/// cells with the control side: the elapsed stream time, the cancellation
/// flag, and the finish flag it raises exactly once when the schedule end
/// is crossed without cancellation.
pub struct ToneGenerator {
    events: Vec<ToneEvent>,
    next_event: usize,
    frequency: f64,
    phase: f64,
    start_time: f64,
    end_time: f64,
    sample_rate: f64,
    sample_pos: u64,
    elapsed: Arc<AtomicDouble>,
    cancelled: Arc<AtomicFlag>,
    finished: Arc<AtomicFlag>,
}

impl ToneGenerator {
    pub fn new(schedule: FrequencySchedule, start_time: f64, end_time: f64, sample_rate: f64) -> Self {
        Self {
            events: schedule.into_events(),
            next_event: 0,
            frequency: 0.0,
            phase: 0.0,
            start_time,
            end_time,
            sample_rate,
            sample_pos: 0,
            elapsed: Arc::new(AtomicDouble::new(0.0)),
            cancelled: Arc::new(AtomicFlag::new(false)),
            finished: Arc::new(AtomicFlag::new(false)),
        }
    }

    /// Elapsed stream time in seconds, updated once per processed block.
    pub fn elapsed(&self) -> Arc<AtomicDouble> {
        Arc::clone(&self.elapsed)
    }

    /// Cancellation flag consumed on the audio thread; once set the
    /// generator outputs silence and never raises `finished`.
    pub fn cancelled(&self) -> Arc<AtomicFlag> {
        Arc::clone(&self.cancelled)
    }

    /// Raised when the schedule end is crossed without cancellation.
    pub fn finished(&self) -> Arc<AtomicFlag> {
        Arc::clone(&self.finished)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    /// Render the next block of mono samples.
    #[inline]
    pub fn process(&mut self, output: &mut [f32]) {
        let dt = 1.0 / self.sample_rate;

        if self.cancelled.get() {
            output.fill(0.0);
            self.sample_pos += output.len() as u64;
            self.elapsed.set(self.sample_pos as f64 * dt);
            return;
        }
        for sample in output.iter_mut() {
            let t = self.sample_pos as f64 * dt;

            while let Some(event) = self.events.get(self.next_event) {
                if event.at > t {
                    break;
                }
                self.frequency = event.hz;
                self.next_event += 1;
            }

            *sample = if t >= self.start_time && t < self.end_time {
                let value = self.phase.sin() as f32;
                self.phase = (self.phase + TAU * self.frequency * dt) % TAU;
                value
            } else {
                0.0
            };

            self.sample_pos += 1;
        }

        self.elapsed.set(self.sample_pos as f64 * dt);

        if !self.finished.get() && self.sample_pos as f64 * dt >= self.end_time {
            self.finished.set(true);
        }
    }
}

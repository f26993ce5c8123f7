//! Per-frame progress polling for a live playback session.

use crate::scheduler::SessionShared;
use std::sync::Arc;

/// One progress observation, polled once per UI frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressUpdate {
    /// Session is live; fraction complete in `[0, 1]`.
    Playing(f32),
    /// Session finished naturally. Terminal; equivalent to progress 1.
    Complete,
    /// Session was cancelled. Terminal; equivalent to progress 0.
    Cancelled,
}

impl ProgressUpdate {
    /// Fraction-complete view of the update.
    pub fn fraction(&self) -> f32 {
        match self {
            ProgressUpdate::Playing(p) => *p,
            ProgressUpdate::Complete => 1.0,
            ProgressUpdate::Cancelled => 0.0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressUpdate::Playing(_))
    }
}

/// Handle to a started session, polled on the UI's refresh cadence.
///
/// Fractions returned across a session's lifetime are monotonically
/// non-decreasing. The terminal [`Complete`] is derived from the finish flag
/// the tone generator raises, not from the polling arithmetic, so it is
/// observed exactly once per finished session no matter how coarse or
/// jittery the polling is. Skipping polls only delays reporting; it never
/// affects the scheduler. Polling after a terminal update repeats it.
///
/// [`Complete`]: ProgressUpdate::Complete
#[derive(Debug)]
pub struct PlaybackHandle {
    shared: Arc<SessionShared>,
    last_reported: f32,
}

impl PlaybackHandle {
    pub(crate) fn new(shared: Arc<SessionShared>) -> Self {
        Self {
            shared,
            last_reported: 0.0,
        }
    }

    /// Observe current progress.
    pub fn poll(&mut self) -> ProgressUpdate {
        if self.shared.cancelled.get() {
            return ProgressUpdate::Cancelled;
        }
        if self.shared.finished.get() {
            self.last_reported = 1.0;
            return ProgressUpdate::Complete;
        }

        let now = self.shared.elapsed.get();
        let duration = self.shared.end_time - self.shared.start_time;
        let progress = if duration > 0.0 {
            (((now - self.shared.start_time) / duration).clamp(0.0, 1.0)) as f32
        } else {
            1.0
        };

        // Never report backwards, regardless of polling granularity.
        let progress = progress.max(self.last_reported);
        self.last_reported = progress;
        ProgressUpdate::Playing(progress)
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.get()
    }

    pub fn is_complete(&self) -> bool {
        self.shared.finished.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfree::{AtomicDouble, AtomicFlag};
    use approx::assert_relative_eq;

    fn session(start: f64, end: f64) -> Arc<SessionShared> {
        Arc::new(SessionShared {
            start_time: start,
            end_time: end,
            elapsed: Arc::new(AtomicDouble::new(0.0)),
            cancelled: Arc::new(AtomicFlag::new(false)),
            finished: Arc::new(AtomicFlag::new(false)),
        })
    }

    #[test]
    fn test_progress_tracks_elapsed_fraction() {
        let shared = session(1.0, 11.0);
        let mut handle = PlaybackHandle::new(Arc::clone(&shared));

        assert_eq!(handle.poll(), ProgressUpdate::Playing(0.0));

        // 6 s into the stream = 5 s into the 10 s signal.
        shared.elapsed.set(6.0);
        match handle.poll() {
            ProgressUpdate::Playing(p) => assert_relative_eq!(p, 0.5, epsilon = 1e-6),
            other => panic!("expected Playing, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_is_clamped_during_lead_in_and_overshoot() {
        let shared = session(1.0, 2.0);
        let mut handle = PlaybackHandle::new(Arc::clone(&shared));

        // During the lead-in, elapsed is negative relative to start.
        shared.elapsed.set(0.5);
        assert_eq!(handle.poll(), ProgressUpdate::Playing(0.0));

        // Past the end without the finish flag yet: clamped to 1.
        shared.elapsed.set(10.0);
        assert_eq!(handle.poll(), ProgressUpdate::Playing(1.0));
    }

    #[test]
    fn test_progress_never_decreases() {
        let shared = session(1.0, 3.0);
        let mut handle = PlaybackHandle::new(Arc::clone(&shared));

        shared.elapsed.set(2.0);
        let high = handle.poll().fraction();

        // A stale clock must not move the report backwards.
        shared.elapsed.set(1.0);
        let later = handle.poll().fraction();
        assert!(later >= high);
    }

    #[test]
    fn test_complete_comes_from_finish_flag() {
        let shared = session(1.0, 2.0);
        let mut handle = PlaybackHandle::new(Arc::clone(&shared));

        // Polling arithmetic alone never yields Complete.
        shared.elapsed.set(10.0);
        assert!(matches!(handle.poll(), ProgressUpdate::Playing(_)));

        shared.finished.set(true);
        assert_eq!(handle.poll(), ProgressUpdate::Complete);
        assert_eq!(handle.poll().fraction(), 1.0);
    }

    #[test]
    fn test_cancelled_is_terminal_zero() {
        let shared = session(1.0, 2.0);
        let mut handle = PlaybackHandle::new(Arc::clone(&shared));

        shared.elapsed.set(1.25);
        assert!(matches!(handle.poll(), ProgressUpdate::Playing(_)));

        shared.cancelled.set(true);
        let update = handle.poll();
        assert_eq!(update, ProgressUpdate::Cancelled);
        assert_eq!(update.fraction(), 0.0);
        assert!(update.is_terminal());
        // Cancellation wins even if the finish flag were raised later.
        shared.finished.set(true);
        assert_eq!(handle.poll(), ProgressUpdate::Cancelled);
    }
}

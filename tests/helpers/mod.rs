//! Shared test fixtures: a deviceless output backend and a synthetic
//! encoder.

#![allow(dead_code)]

use parking_lot::Mutex;
use sstv::core::output::{OutputBackend, OutputStream};
use sstv::core::Result;
use sstv::{PixelData, SstvEncoder, ToneGenerator, ToneSink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SAMPLE_RATE: f64 = 48_000.0;

/// Output backend that opens no device. The tone generator handed to
/// `start` is parked where the test can pump it, standing in for the audio
/// callback.
pub struct MockOutput {
    pub tone: Arc<Mutex<Option<ToneGenerator>>>,
    pub active_streams: Arc<AtomicUsize>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            tone: Arc::new(Mutex::new(None)),
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub struct MockStream {
    active_streams: Arc<AtomicUsize>,
}

impl OutputStream for MockStream {}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.active_streams.fetch_sub(1, Ordering::SeqCst);
    }
}

impl OutputBackend for MockOutput {
    fn sample_rate(&self) -> f64 {
        SAMPLE_RATE
    }

    fn start(&mut self, tone: ToneGenerator) -> Result<Box<dyn OutputStream>> {
        *self.tone.lock() = Some(tone);
        self.active_streams.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockStream {
            active_streams: Arc::clone(&self.active_streams),
        }))
    }
}

/// Drive the parked tone generator for `seconds` of stream time, in
/// callback-sized blocks.
pub fn pump(tone: &Arc<Mutex<Option<ToneGenerator>>>, seconds: f64) {
    let mut guard = tone.lock();
    let tone = guard.as_mut().expect("no tone generator parked");

    let mut remaining = (seconds * SAMPLE_RATE).round() as usize;
    let mut block = vec![0.0f32; 512];
    while remaining > 0 {
        let n = remaining.min(block.len());
        tone.process(&mut block[..n]);
        remaining -= n;
    }
}

/// Encoder that schedules a single constant tone of known length.
pub struct TestEncoder {
    pub mode: &'static str,
    pub hz: f64,
    pub length: f64,
}

impl TestEncoder {
    pub fn new(length: f64) -> Self {
        Self {
            mode: "Test Mode",
            hz: 1000.0,
            length,
        }
    }
}

impl SstvEncoder for TestEncoder {
    fn mode_name(&self) -> &str {
        self.mode
    }

    fn prepare_image(&mut self, _pixels: &PixelData) -> Result<()> {
        Ok(())
    }

    fn encode(&self, sink: &mut dyn ToneSink, start_time: f64) -> f64 {
        sink.set_frequency(start_time, self.hz);
        start_time + self.length
    }

    fn encoded_length(&self) -> f64 {
        self.length
    }
}

pub fn pixels() -> PixelData {
    PixelData::new(4, 4, vec![0; 64])
}

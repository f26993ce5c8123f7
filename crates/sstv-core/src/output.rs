//! Audio output seam and its CPAL implementation.

use crate::tone::ToneGenerator;
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// RAII handle to a running audio-output resource.
///
/// Dropping the handle stops playback and releases the device. At most one
/// handle exists per [`SignalScheduler`](crate::SignalScheduler).
pub trait OutputStream: Send {}

/// Seam between the scheduler and the audio device.
///
/// The default implementation is [`CpalOutput`]; tests inject their own
/// backend so no device is opened.
pub trait OutputBackend: Send {
    /// Output sample rate the backend will drive the tone at.
    fn sample_rate(&self) -> f64;

    /// Start rendering `tone` to the output, consuming it.
    fn start(&mut self, tone: ToneGenerator) -> Result<Box<dyn OutputStream>>;
}

/// Wrapper to hold `cpal::Stream` in a `Send` context.
///
/// # Safety
/// `cpal::Stream` is `!Send` due to platform internals. This is safe because
/// the stream is only ever owned by the scheduler, which lives behind the
/// `SstvSystem` mutex.
struct StreamHandle(#[allow(dead_code)] cpal::Stream);

unsafe impl Send for StreamHandle {}

impl OutputStream for StreamHandle {}

/// CPAL output backend.
///
/// One stream is built per playback session at the device's native sample
/// rate; the mono tone is written to every output channel.
pub struct CpalOutput {
    sample_rate: f64,
    device_index: Option<usize>,
}

impl CpalOutput {
    /// Use the default output device.
    pub fn new() -> Result<Self> {
        Self::with_device(None)
    }

    /// Use the output device at `index` (see [`list_devices`]), or the
    /// default device when `None`.
    ///
    /// [`list_devices`]: CpalOutput::list_devices
    pub fn with_device(index: Option<usize>) -> Result<Self> {
        let device = get_device(index)?;
        let config = device.default_output_config()?;

        Ok(Self {
            sample_rate: config.sample_rate().0 as f64,
            device_index: index,
        })
    }

    pub fn device_name(&self) -> Result<String> {
        Ok(get_device(self.device_index)?.name()?)
    }

    pub fn list_devices() -> Result<Vec<String>> {
        cpal::default_host()
            .output_devices()?
            .enumerate()
            .map(|(i, d)| Ok(format!("{i}: {}", d.name()?)))
            .collect()
    }
}

impl OutputBackend for CpalOutput {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn start(&mut self, tone: ToneGenerator) -> Result<Box<dyn OutputStream>> {
        let device = get_device(self.device_index)?;
        let config = device.default_output_config()?;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), tone)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), tone)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), tone)?,
            format => {
                return Err(Error::InvalidDevice(format!(
                    "Unsupported sample format: {format:?}"
                )));
            }
        };

        stream.play()?;
        Ok(Box::new(StreamHandle(stream)))
    }
}

fn get_device(index: Option<usize>) -> Result<cpal::Device> {
    let host = cpal::default_host();

    match index {
        Some(i) => {
            let devices: Vec<_> = host.output_devices()?.collect();
            let count = devices.len();
            devices.into_iter().nth(i).ok_or_else(|| {
                Error::InvalidDevice(format!("Device index {i} out of range ({count} available)"))
            })
        }
        None => host
            .default_output_device()
            .ok_or_else(|| Error::InvalidDevice("No output device available".into())),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut tone: ToneGenerator,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;

    // Pre-allocated mono buffer (grows on first callback, then stable).
    let mut mono = Vec::<f32>::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let frames = data.len() / channels;
                if mono.len() < frames {
                    mono.resize(frames, 0.0);
                }
                tone.process(&mut mono[..frames]);
                write_output(data, channels, &mono);
            }));

            if result.is_err() {
                output_silence(data);
            }
        },
        |_err| {},
        None,
    )?;

    Ok(stream)
}

/// Fan the mono tone out to every device channel.
#[inline]
fn write_output<T: cpal::SizedSample + cpal::FromSample<f32>>(
    data: &mut [T],
    channels: usize,
    mono: &[f32],
) {
    for (i, sample) in data.iter_mut().enumerate() {
        *sample = T::from_sample(mono[i / channels]);
    }
}

/// Output silence (panic recovery).
#[inline]
fn output_silence<T: cpal::SizedSample + cpal::FromSample<f32>>(data: &mut [T]) {
    for sample in data.iter_mut() {
        *sample = T::from_sample(0.0);
    }
}

//! Microphone capture: cpal input stream down-mixed to mono into a ring buffer
//! that always holds the most recent window of samples.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{traits::*, HeapRb};
use scope_core::{AcquireError, SampleSource};
use std::fmt::Display;
use std::sync::{Arc, Mutex};

pub struct MicCapture {
    stream: Option<cpal::Stream>,
    buffer: Arc<Mutex<HeapRb<f32>>>,
    window_len: usize,
}

impl MicCapture {
    /// Open the default input device and start streaming into a window of `window_len` samples.
    pub fn open(window_len: usize) -> Result<Self, AcquireError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| AcquireError::DeviceUnavailable("no default input device".into()))?;
        let name = device.name().unwrap_or_else(|_| "unknown".into());
        let supported = device.default_input_config().map_err(unavailable)?;
        let channels = supported.channels() as usize;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let buffer = Arc::new(Mutex::new(HeapRb::<f32>::new(window_len.max(1))));
        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_input::<f32>(&device, &config, channels, Arc::clone(&buffer), |s| s)
            }
            cpal::SampleFormat::I16 => {
                build_input::<i16>(&device, &config, channels, Arc::clone(&buffer), |s| {
                    s as f32 / i16::MAX as f32
                })
            }
            cpal::SampleFormat::U16 => {
                build_input::<u16>(&device, &config, channels, Arc::clone(&buffer), |s| {
                    (s as f32 - 32768.0) / 32768.0
                })
            }
            other => {
                return Err(AcquireError::DeviceUnavailable(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        }?;
        stream.play().map_err(unavailable)?;
        log::info!(
            "[audio] capturing from '{}' ({} ch @ {} Hz, window {})",
            name,
            channels,
            config.sample_rate.0,
            window_len
        );

        Ok(Self {
            stream: Some(stream),
            buffer,
            window_len,
        })
    }
}

fn unavailable(err: impl Display) -> AcquireError {
    AcquireError::DeviceUnavailable(err.to_string())
}

fn build_input<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    buffer: Arc<Mutex<HeapRb<f32>>>,
    to_f32: fn(T) -> f32,
) -> Result<cpal::Stream, AcquireError>
where
    T: cpal::SizedSample + Send + 'static,
{
    let channels = channels.max(1);
    let err_fn = |err: cpal::StreamError| log::error!("[audio] input stream error: {err}");
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let Ok(mut rb) = buffer.lock() else {
                    return;
                };
                for frame in data.chunks(channels) {
                    let sum: f32 = frame.iter().map(|&s| to_f32(s)).sum();
                    rb.push_overwrite(sum / frame.len() as f32);
                }
            },
            err_fn,
            None,
        )
        .map_err(unavailable)
}

/// Copy the newest `out.len()` samples of `rb` into `out`, zero-padding the
/// front while the buffer is still filling.
fn copy_latest(rb: &HeapRb<f32>, out: &mut [f32]) {
    let available = rb.occupied_len();
    let pad = out.len().saturating_sub(available);
    let skip = available.saturating_sub(out.len());
    out[..pad].fill(0.0);
    for (dst, &src) in out[pad..].iter_mut().zip(rb.iter().skip(skip)) {
        *dst = src;
    }
}

impl SampleSource for MicCapture {
    fn window_len(&self) -> usize {
        self.window_len
    }

    fn read_window(&mut self, out: &mut [f32]) {
        match self.buffer.lock() {
            Ok(rb) => copy_latest(&rb, out),
            Err(_) => out.fill(0.0),
        }
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            _ = stream.pause();
            drop(stream);
        }
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        self.close();
    }
}

//! Live capture source
//!
//! Wraps a device input stream so the sampler can read it like any other
//! source. Samples cross from the callback thread over the ring buffer and
//! land in the history on `refresh`.

use super::buffer::{AudioConsumer, AudioRingBuffer};
use super::input::{AudioDeviceInfo, AudioInput};
use crate::config::SamplerConfig;
use crate::error::Result;
use crate::source::{AudioSource, BufferedSource};
use crate::spectrum::WindowType;
use tracing::warn;

/// Audio source fed by a system input device
pub struct CaptureSource {
    input: AudioInput,
    consumer: AudioConsumer,
    history: BufferedSource,
    scratch: Vec<f64>,
}

impl CaptureSource {
    /// Open the configured capture device and start streaming
    pub fn open(config: &SamplerConfig) -> Result<Self> {
        let rb = AudioRingBuffer::new(config.capture.ring_buffer_size);
        let (producer, consumer) = rb.split();

        let input = AudioInput::open(config.capture.device_name.as_deref(), producer)?;
        input.start()?;

        // The device may not run at the configured rate
        let mut history = BufferedSource::from_config(config);
        history.set_sample_rate(input.device_info().sample_rate as f64);

        Ok(Self {
            input,
            consumer,
            history,
            scratch: vec![0.0; config.capture.ring_buffer_size],
        })
    }

    pub fn device_info(&self) -> &AudioDeviceInfo {
        self.input.device_info()
    }

    pub fn start(&self) -> Result<()> {
        Ok(self.input.start()?)
    }

    pub fn pause(&self) -> Result<()> {
        Ok(self.input.pause()?)
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.history.set_volume(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.history.set_muted(muted);
    }
}

impl AudioSource for CaptureSource {
    fn output_data(&self, out: &mut [f64]) {
        self.history.output_data(out);
    }

    fn spectrum_data(&mut self, out: &mut [f64], window: WindowType) -> Result<()> {
        self.history.spectrum_data(out, window)
    }

    fn volume(&self) -> f64 {
        self.history.volume()
    }

    fn is_muted(&self) -> bool {
        self.history.is_muted()
    }

    fn sample_rate(&self) -> f64 {
        self.history.sample_rate()
    }

    fn refresh(&mut self) {
        let dropped = drain_ring(&mut self.consumer, &mut self.history, &mut self.scratch);
        if dropped > 0 {
            warn!(
                device = %self.input.device_info().name,
                dropped,
                "Capture ring buffer overflowed"
            );
        }
    }
}

/// Move everything pending in the ring into `history`, `scratch.len()` samples at a time
///
/// # Returns
/// Samples the producer dropped since the previous drain
fn drain_ring(
    consumer: &mut AudioConsumer,
    history: &mut BufferedSource,
    scratch: &mut [f64],
) -> usize {
    while !consumer.is_empty() {
        let read = consumer.read(scratch);
        if read == 0 {
            break;
        }
        history.push(&scratch[..read]);
    }

    consumer.take_dropped()
}

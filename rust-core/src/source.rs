//! Audio sources the sampler reads from
//!
//! `AudioSource` is the backend contract: raw output samples, a windowed
//! magnitude spectrum, and the channel's volume / mute state.

use crate::config::SamplerConfig;
use crate::error::Result;
use crate::spectrum::{SpectrumAnalyzer, WindowType};
use std::collections::VecDeque;

/// A playback or capture channel that can be sampled
pub trait AudioSource {
    /// Fill `out` with the most recent time-domain samples, oldest first
    fn output_data(&self, out: &mut [f64]);

    /// Fill `out` (length N) with the magnitude spectrum over 0..Nyquist
    fn spectrum_data(&mut self, out: &mut [f64], window: WindowType) -> Result<()>;

    /// Channel volume in [0, 1]
    fn volume(&self) -> f64;

    fn is_muted(&self) -> bool;

    /// Sample rate in Hz
    fn sample_rate(&self) -> f64;

    /// Pull pending audio from the backend; called once per frame
    fn refresh(&mut self) {}
}

/// In-memory source holding the latest samples pushed into it
pub struct BufferedSource {
    history: VecDeque<f64>,
    capacity: usize,
    sample_rate: f64,
    volume: f64,
    muted: bool,
    analyzer: Option<SpectrumAnalyzer>,
    frame: Vec<f64>,
}

impl BufferedSource {
    /// Create a source keeping up to `capacity` samples
    pub fn new(capacity: usize, sample_rate: f64) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            sample_rate,
            volume: 1.0,
            muted: false,
            analyzer: None,
            frame: Vec::new(),
        }
    }

    /// Create a source sized and clocked from the sampler configuration
    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(config.history_len, config.sample_rate as f64)
    }

    /// Append samples, discarding the oldest beyond capacity
    pub fn push(&mut self, samples: &[f64]) {
        if samples.len() >= self.capacity {
            self.history.clear();
            self.history
                .extend(&samples[samples.len() - self.capacity..]);
            return;
        }

        let overflow = (self.history.len() + samples.len()).saturating_sub(self.capacity);
        self.history.drain(..overflow);
        self.history.extend(samples);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }
}

impl AudioSource for BufferedSource {
    fn output_data(&self, out: &mut [f64]) {
        let available = self.history.len().min(out.len());
        let pad = out.len() - available;

        out[..pad].fill(0.0);
        let start = self.history.len() - available;
        for (o, &s) in out[pad..].iter_mut().zip(self.history.range(start..)) {
            *o = s;
        }
    }

    fn spectrum_data(&mut self, out: &mut [f64], window: WindowType) -> Result<()> {
        let num_bins = out.len();
        if num_bins == 0 {
            return Ok(());
        }

        let mut frame = std::mem::take(&mut self.frame);
        frame.resize(2 * num_bins, 0.0);
        self.output_data(&mut frame);

        let analyzer = self
            .analyzer
            .get_or_insert_with(|| SpectrumAnalyzer::new(num_bins, window));
        analyzer.reconfigure(num_bins, window);

        let result = analyzer.analyze_into(&frame, out);
        self.frame = frame;
        result
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

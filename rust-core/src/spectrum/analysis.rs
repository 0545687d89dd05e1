//! Magnitude spectrum for audio sources
//!
//! Produces an N-bin spectrum covering 0..Nyquist from the latest 2N samples.

use super::fft::FftEngine;
use super::windowing::{apply_coefficients_inplace, window_correction_factor};
use super::windows::{generate_window, WindowType};
use crate::error::Result;
use tracing::debug;

/// Spectrum analyzer with a cached FFT plan and window
pub struct SpectrumAnalyzer {
    fft_engine: FftEngine,
    window_type: WindowType,
    window: Vec<f64>,

    /// 2 / sum(window): a full-scale sinusoid reads ~1.0 at its peak
    amplitude_scale: f64,

    scratch: Vec<f64>,
}

impl SpectrumAnalyzer {
    /// Create an analyzer producing `num_bins` output bins
    pub fn new(num_bins: usize, window_type: WindowType) -> Self {
        let fft_size = 2 * num_bins;
        let window = generate_window(window_type, fft_size);
        let amplitude_scale = amplitude_scale(&window);

        Self {
            fft_engine: FftEngine::new(fft_size),
            window_type,
            window,
            amplitude_scale,
            scratch: vec![0.0; fft_size],
        }
    }

    /// Number of output bins N
    pub fn num_bins(&self) -> usize {
        self.fft_engine.fft_size() / 2
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Re-plan if the requested shape differs from the cached one
    pub fn reconfigure(&mut self, num_bins: usize, window_type: WindowType) {
        if num_bins == self.num_bins() && window_type == self.window_type {
            return;
        }

        debug!(
            num_bins,
            window = ?window_type,
            "Re-planning spectrum analyzer"
        );
        *self = Self::new(num_bins, window_type);
    }

    /// Analyze `frame` (length 2N, oldest sample first) into `out` (length N)
    pub fn analyze_into(&mut self, frame: &[f64], out: &mut [f64]) -> Result<()> {
        let fft_size = self.fft_engine.fft_size();
        let copy_len = frame.len().min(fft_size);

        self.scratch[..copy_len].copy_from_slice(&frame[..copy_len]);
        self.scratch[copy_len..].fill(0.0);
        apply_coefficients_inplace(&mut self.scratch, &self.window);

        let magnitude = self.fft_engine.compute_magnitude(&self.scratch)?;

        for (o, &m) in out.iter_mut().zip(magnitude.iter()) {
            *o = m * self.amplitude_scale;
        }
        Ok(())
    }

    /// Analyze signal and return the N-bin magnitude spectrum
    pub fn analyze(&mut self, frame: &[f64]) -> Result<Vec<f64>> {
        let mut out = vec![0.0; self.num_bins()];
        self.analyze_into(frame, &mut out)?;
        Ok(out)
    }
}

/// Scale making a full-scale sinusoid read ~1.0: 2 / sum(window)
fn amplitude_scale(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    2.0 * window_correction_factor(window) / window.len() as f64
}

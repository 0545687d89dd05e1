//! Spectral analysis with FFT

pub mod analysis;
pub mod fft;
pub mod windowing;
pub mod windows;

pub use analysis::SpectrumAnalyzer;
pub use fft::FftEngine;
pub use windows::{generate_window, WindowType};

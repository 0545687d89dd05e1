//! Audio Sampler - volume and frequency-band analysis for visualizers
//!
//! Reads time-domain samples and windowed magnitude spectra from audio
//! sources and derives levels, energy and per-band data once per frame.

pub mod audio;
pub mod bands;
pub mod config;
pub mod error;
pub mod rebin;
pub mod sampler;
pub mod source;
pub mod spectrum;

pub use audio::CaptureSource;
pub use bands::FrequencyBand;
pub use config::{CaptureConfig, SamplerConfig};
pub use error::{Result, SamplerError};
pub use sampler::AudioSampler;
pub use source::{AudioSource, BufferedSource};
pub use spectrum::{SpectrumAnalyzer, WindowType};

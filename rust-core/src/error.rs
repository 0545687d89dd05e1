//! Error types for the audio sampler

use crate::audio::input::AudioError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Unknown audio source {index} (sampler has {count} sources)")]
    UnknownSource { index: usize, count: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("FFT processing failed: {0}")]
    Fft(String),

    #[error("Audio device error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SamplerError>;

//! Sampler configuration
//!
//! Loaded from TOML or built in code; every field has a default so partial
//! files are accepted.

use crate::error::{Result, SamplerError};
use crate::spectrum::WindowType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest spectrum length accepted by the analyzer
pub const MIN_SAMPLE_COUNT: usize = 64;

/// Largest spectrum length accepted by the analyzer
pub const MAX_SAMPLE_COUNT: usize = 8192;

/// Audio sampler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Default number of time-domain samples, also the spectrum length N
    pub sample_count: usize,

    /// Sample rate (Hz) used for in-memory sources
    pub sample_rate: u32,

    /// Number of most recent samples each source keeps
    pub history_len: usize,

    /// Window applied before the FFT
    pub spectrum_window: WindowType,

    /// Log per-band levels on every `update`
    pub debug: bool,

    /// Live capture settings
    pub capture: CaptureConfig,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_count: 1024,
            sample_rate: 48000,
            history_len: 16384,
            spectrum_window: WindowType::BlackmanHarris,
            debug: false,
            capture: CaptureConfig::default(),
        }
    }
}

/// Capture device configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Device name (None = default input device)
    pub device_name: Option<String>,

    /// Ring buffer capacity between the device callback and the source
    pub ring_buffer_size: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            ring_buffer_size: 96000,
        }
    }
}

impl SamplerConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SamplerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check ranges and cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if !self.sample_count.is_power_of_two()
            || !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&self.sample_count)
        {
            return Err(SamplerError::InvalidConfig(format!(
                "sample_count must be a power of two in {}..={} (got {})",
                MIN_SAMPLE_COUNT, MAX_SAMPLE_COUNT, self.sample_count
            )));
        }

        if !(8000..=192000).contains(&self.sample_rate) {
            return Err(SamplerError::InvalidConfig(format!(
                "sample_rate must be in 8000..=192000 Hz (got {})",
                self.sample_rate
            )));
        }

        // The spectrum needs 2N samples of history
        if self.history_len < 2 * self.sample_count {
            return Err(SamplerError::InvalidConfig(format!(
                "history_len must be at least 2 * sample_count = {} (got {})",
                2 * self.sample_count,
                self.history_len
            )));
        }

        self.capture.validate()
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.device_name {
            if name.trim().is_empty() {
                return Err(SamplerError::InvalidConfig(
                    "capture.device_name cannot be empty".to_string(),
                ));
            }
        }

        if self.ring_buffer_size == 0 {
            return Err(SamplerError::InvalidConfig(
                "capture.ring_buffer_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

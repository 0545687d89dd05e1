//! Audio sampler
//!
//! Derives volume, energy and per-band levels from one or more audio
//! sources, once per rendered frame. Results are recomputed on every call
//! and never cached.

use crate::bands::FrequencyBand;
use crate::config::SamplerConfig;
use crate::error::{Result, SamplerError};
use crate::rebin::{normalize, normalize_inplace, rebin};
use crate::source::AudioSource;
use tracing::{debug, warn};

/// Samples audio across multiple sources
pub struct AudioSampler {
    config: SamplerConfig,
    sources: Vec<Box<dyn AudioSource>>,
}

impl AudioSampler {
    /// Create a sampler over `sources`
    pub fn new(config: SamplerConfig, sources: Vec<Box<dyn AudioSource>>) -> Result<Self> {
        config.validate()?;

        if sources.is_empty() {
            warn!("Audio sampler created without audio sources");
        }

        Ok(Self { config, sources })
    }

    pub fn add_source(&mut self, source: Box<dyn AudioSource>) -> usize {
        self.sources.push(source);
        self.sources.len() - 1
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn source(&self, index: usize) -> Result<&dyn AudioSource> {
        let count = self.sources.len();
        self.sources
            .get(index)
            .map(|s| &**s)
            .ok_or(SamplerError::UnknownSource { index, count })
    }

    pub fn source_mut(&mut self, index: usize) -> Result<&mut (dyn AudioSource + 'static)> {
        let count = self.sources.len();
        self.sources
            .get_mut(index)
            .map(|s| &mut **s)
            .ok_or(SamplerError::UnknownSource { index, count })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Per-frame hook: pull pending audio into every source
    pub fn update(&mut self) -> Result<()> {
        for source in self.sources.iter_mut() {
            source.refresh();
        }

        if self.config.debug {
            self.log_band_levels()?;
        }
        Ok(())
    }

    /// `count` output samples, normalized and scaled by volume
    pub fn samples(&self, index: usize, count: usize) -> Result<Vec<f64>> {
        self.samples_with(index, count, false)
    }

    /// Like [`samples`](Self::samples), optionally rectified before normalizing
    pub fn samples_with(&self, index: usize, count: usize, absolute: bool) -> Result<Vec<f64>> {
        let source = self.source(index)?;
        if source.is_muted() {
            return Ok(vec![0.0; count]);
        }

        let mut samples = vec![0.0; count];
        source.output_data(&mut samples);
        if absolute {
            samples.iter_mut().for_each(|s| *s = s.abs());
        }

        normalize_inplace(&mut samples);
        let volume = source.volume();
        samples.iter_mut().for_each(|s| *s *= volume);
        Ok(samples)
    }

    /// Sum of squared (normalized, volume-scaled) samples, scaled by volume
    pub fn instant_energy(&self, index: usize) -> Result<f64> {
        let source = self.source(index)?;
        if source.is_muted() {
            return Ok(0.0);
        }

        let samples = self.samples(index, self.config.sample_count)?;
        let sum: f64 = samples.iter().map(|s| s * s).sum();
        Ok(sum * source.volume())
    }

    /// Root mean square of the raw output samples, scaled by volume
    pub fn rms(&self, index: usize) -> Result<f64> {
        let source = self.source(index)?;
        if source.is_muted() {
            return Ok(0.0);
        }

        let count = self.config.sample_count;
        let mut samples = vec![0.0; count];
        source.output_data(&mut samples);

        let sum: f64 = samples.iter().map(|s| s * s).sum();
        Ok((sum / count as f64).sqrt() * source.volume())
    }

    /// Average spectrum magnitude inside `band`, scaled by volume
    pub fn frequency_volume(&mut self, index: usize, band: FrequencyBand) -> Result<f64> {
        let Some(slice) = self.band_slice(index, band, true)? else {
            return Ok(0.0);
        };
        if slice.is_empty() {
            return Ok(0.0);
        }

        Ok(slice.iter().sum::<f64>() / slice.len() as f64)
    }

    /// Raw spectrum slice for `band`, normalized
    pub fn frequency_data(&mut self, index: usize, band: FrequencyBand) -> Result<Vec<f64>> {
        match self.band_slice(index, band, false)? {
            Some(slice) => Ok(normalize(&slice)),
            None => {
                let len = self
                    .bin_range(index, band)?
                    .map_or(0, |(n1, n2)| n2 - n1 + 1);
                warn!(source = index, %band, "Audio source is muted");
                Ok(vec![0.0; len])
            }
        }
    }

    /// Spectrum slice for `band`, rebinned to `num_bins` and normalized
    pub fn frequency_data_binned(
        &mut self,
        index: usize,
        band: FrequencyBand,
        num_bins: usize,
        absolute: bool,
    ) -> Result<Vec<f64>> {
        match self.band_slice(index, band, absolute)? {
            Some(slice) => {
                let mut binned = rebin(&slice, num_bins);
                normalize_inplace(&mut binned);
                Ok(binned)
            }
            None => {
                warn!(source = index, %band, "Audio source is muted");
                Ok(vec![0.0; num_bins])
            }
        }
    }

    /// `frequency_volume` for every band, in `FrequencyBand::ALL` order
    pub fn band_levels(&mut self, index: usize) -> Result<[f64; 8]> {
        let mut levels = [0.0; 8];
        for (level, band) in levels.iter_mut().zip(FrequencyBand::ALL) {
            *level = self.frequency_volume(index, band)?;
        }
        Ok(levels)
    }

    fn log_band_levels(&mut self) -> Result<()> {
        for index in 0..self.sources.len() {
            let levels = self.band_levels(index)?;
            for (band, level) in FrequencyBand::ALL.iter().zip(levels) {
                let bar = (level * 10.0).clamp(0.0, 0.5);
                debug!(source = index, band = band.label(), level = bar, "band level");
            }
        }
        Ok(())
    }

    /// Bin range of `band` for this source, `None` if it lies above Nyquist
    fn bin_range(&self, index: usize, band: FrequencyBand) -> Result<Option<(usize, usize)>> {
        let source = self.source(index)?;
        let nyquist = source.sample_rate() / 2.0;
        let num_bins = self.config.sample_count;

        let range = band.bin_range(num_bins, nyquist);
        let (low, high) = band.range();
        if range.is_none() {
            debug!(%band, low, high, nyquist, "Band lies above Nyquist, no bins");
        } else if high >= nyquist {
            debug!(%band, low, high, nyquist, "Band extends past Nyquist, clamping to last bin");
        }
        Ok(range)
    }

    /// Volume-scaled spectrum bins for `band`, or `None` if the source is muted
    ///
    /// Empty when the band has no bins below Nyquist.
    fn band_slice(
        &mut self,
        index: usize,
        band: FrequencyBand,
        absolute: bool,
    ) -> Result<Option<Vec<f64>>> {
        let range = self.bin_range(index, band)?;
        let num_bins = self.config.sample_count;
        let window = self.config.spectrum_window;

        let source = self.source_mut(index)?;
        if source.is_muted() {
            return Ok(None);
        }
        let Some((n1, n2)) = range else {
            return Ok(Some(Vec::new()));
        };

        let mut spectrum = vec![0.0; num_bins];
        source.spectrum_data(&mut spectrum, window)?;

        let volume = source.volume();
        let slice = spectrum[n1..=n2]
            .iter()
            .map(|&m| {
                let m = if absolute { m.abs() } else { m };
                m * volume
            })
            .collect();
        Ok(Some(slice))
    }
}

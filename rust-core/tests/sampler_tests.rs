//! Integration tests driving the sampler through custom sources

use audio_sampler::{
    AudioSampler, AudioSource, BufferedSource, FrequencyBand, SamplerConfig, SamplerError,
    WindowType,
};
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Source with a fixed sample buffer and a fixed spectrum
struct FixedSource {
    samples: Vec<f64>,
    spectrum: Vec<f64>,
    sample_rate: f64,
    volume: f64,
    muted: bool,
    refreshes: Rc<Cell<usize>>,
}

impl FixedSource {
    fn new(spectrum: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            samples: Vec::new(),
            spectrum,
            sample_rate,
            volume: 1.0,
            muted: false,
            refreshes: Rc::new(Cell::new(0)),
        }
    }
}

impl AudioSource for FixedSource {
    fn output_data(&self, out: &mut [f64]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.samples.get(i).copied().unwrap_or(0.0);
        }
    }

    fn spectrum_data(&mut self, out: &mut [f64], _window: WindowType) -> audio_sampler::Result<()> {
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.spectrum.get(i).copied().unwrap_or(0.0);
        }
        Ok(())
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

    fn refresh(&mut self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

fn ramp_spectrum() -> Vec<f64> {
    (0..1024).map(|i| i as f64 / 1024.0).collect()
}

#[test]
fn test_frequency_volume_is_band_average() {
    init_tracing();

    let mut source = FixedSource::new(ramp_spectrum(), 48000.0);
    source.volume = 0.5;
    let mut sampler = AudioSampler::new(SamplerConfig::default(), vec![Box::new(source)]).unwrap();

    // Bass covers bins 2..=10
    let expected = (2..=10).map(|i| i as f64 / 1024.0).sum::<f64>() / 9.0 * 0.5;
    let level = sampler.frequency_volume(0, FrequencyBand::Bass).unwrap();
    assert!((level - expected).abs() < 1e-12);
}

#[test]
fn test_frequency_volume_uses_absolute_magnitudes() {
    let spectrum: Vec<f64> = (0..1024).map(|i| if i % 2 == 0 { -1.0 } else { 1.0 }).collect();
    let mut sampler = AudioSampler::new(
        SamplerConfig::default(),
        vec![Box::new(FixedSource::new(spectrum, 48000.0))],
    )
    .unwrap();

    let level = sampler.frequency_volume(0, FrequencyBand::Mid).unwrap();
    assert!((level - 1.0).abs() < 1e-12);
}

#[test]
fn test_downsampled_band_is_group_mean() {
    let mut sampler = AudioSampler::new(
        SamplerConfig::default(),
        vec![Box::new(FixedSource::new(ramp_spectrum(), 48000.0))],
    )
    .unwrap();

    // Mid covers bins 21..=85 (65 bins); 4 bins of 16, last bin dropped
    let binned = sampler
        .frequency_data_binned(0, FrequencyBand::Mid, 4, false)
        .unwrap();
    assert_eq!(binned.len(), 4);

    let means: Vec<f64> = (0..4)
        .map(|b| {
            let start = 21 + b * 16;
            (start..start + 16).map(|i| i as f64 / 1024.0).sum::<f64>() / 16.0
        })
        .collect();
    let max = means[3];
    for (got, mean) in binned.iter().zip(&means) {
        assert!((got - mean / max).abs() < 1e-12);
    }
}

#[test]
fn test_upsampled_band_duplicates_values() {
    let mut sampler = AudioSampler::new(
        SamplerConfig::default(),
        vec![Box::new(FixedSource::new(ramp_spectrum(), 48000.0))],
    )
    .unwrap();

    // SubBass covers bins 0..=2
    let binned = sampler
        .frequency_data_binned(0, FrequencyBand::SubBass, 6, false)
        .unwrap();
    assert_eq!(binned, vec![0.0, 0.0, 0.5, 0.5, 1.0, 1.0]);
}

#[test]
fn test_low_sample_rate_clamps_to_spectrum() {
    init_tracing();

    // 16 kHz: Nyquist 8 kHz, VeryHigh would index past the spectrum
    let mut sampler = AudioSampler::new(
        SamplerConfig::default(),
        vec![Box::new(FixedSource::new(ramp_spectrum(), 16000.0))],
    )
    .unwrap();

    let data = sampler.frequency_data(0, FrequencyBand::VeryHigh).unwrap();
    assert_eq!(data.len(), 1023 - 768 + 1);
    assert!((data[data.len() - 1] - 1.0).abs() < 1e-12);
}

#[test]
fn test_bands_above_nyquist_have_no_bins() {
    init_tracing();

    // 8 kHz: Nyquist 4 kHz, High and VeryHigh start at or above it
    let mut sampler = AudioSampler::new(
        SamplerConfig::default(),
        vec![Box::new(FixedSource::new(ramp_spectrum(), 8000.0))],
    )
    .unwrap();

    assert!(sampler.frequency_data(0, FrequencyBand::High).unwrap().is_empty());
    assert!(sampler.frequency_data(0, FrequencyBand::VeryHigh).unwrap().is_empty());
    assert_eq!(sampler.frequency_volume(0, FrequencyBand::VeryHigh).unwrap(), 0.0);

    let upper = sampler.frequency_data(0, FrequencyBand::UpperMid).unwrap();
    assert_eq!(upper.len(), 1023 - 512 + 1);
}

#[test]
fn test_samples_absolute_then_normalized() {
    let mut source = FixedSource::new(Vec::new(), 48000.0);
    source.samples = vec![0.5, -2.0, 1.0, 0.0];
    source.volume = 0.5;
    let sampler = AudioSampler::new(SamplerConfig::default(), vec![Box::new(source)]).unwrap();

    assert_eq!(
        sampler.samples(0, 4).unwrap(),
        vec![0.125, -0.5, 0.25, 0.0]
    );
    assert_eq!(
        sampler.samples_with(0, 4, true).unwrap(),
        vec![0.125, 0.5, 0.25, 0.0]
    );
}

#[test]
fn test_rms_uses_raw_samples() {
    let mut source = FixedSource::new(Vec::new(), 48000.0);
    source.samples = vec![0.5; 1024];
    source.volume = 0.5;
    let sampler = AudioSampler::new(SamplerConfig::default(), vec![Box::new(source)]).unwrap();

    assert!((sampler.rms(0).unwrap() - 0.25).abs() < 1e-12);
}

#[test]
fn test_update_refreshes_every_source() {
    init_tracing();

    let config = SamplerConfig {
        debug: true,
        ..SamplerConfig::default()
    };
    let fixed = FixedSource::new(ramp_spectrum(), 48000.0);
    let refreshes = Rc::clone(&fixed.refreshes);
    let sources: Vec<Box<dyn AudioSource>> = vec![
        Box::new(fixed),
        Box::new(BufferedSource::new(4096, 48000.0)),
    ];
    let mut sampler = AudioSampler::new(config, sources).unwrap();

    sampler.update().unwrap();
    sampler.update().unwrap();
    assert_eq!(refreshes.get(), 2);

    let levels = sampler.band_levels(0).unwrap();
    assert!(levels.iter().all(|&l| l > 0.0));
    assert!(matches!(
        sampler.band_levels(2),
        Err(SamplerError::UnknownSource { index: 2, count: 2 })
    ));
}

#[test]
fn test_buffered_source_end_to_end() {
    init_tracing();

    let config = SamplerConfig::from_toml_str(
        r#"
        sample_count = 2048
        sample_rate = 44100
        spectrum_window = "blackman_harris"
        "#,
    )
    .unwrap();

    let mut source = BufferedSource::from_config(&config);
    assert_eq!(source.sample_rate(), 44100.0);
    // 100 Hz tone
    let tone: Vec<f64> = (0..8192)
        .map(|n| 0.8 * (2.0 * PI * 100.0 * n as f64 / 44100.0).sin())
        .collect();
    source.push(&tone);

    let mut sampler = AudioSampler::new(config, vec![Box::new(source)]).unwrap();
    let levels = sampler.band_levels(0).unwrap();

    let bass = levels[FrequencyBand::Bass as usize];
    assert!(bass > levels[FrequencyBand::Mid as usize] * 10.0);
    assert!(bass > levels[FrequencyBand::High as usize] * 10.0);
}

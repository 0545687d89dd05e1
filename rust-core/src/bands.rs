//! Named frequency bands used for visualization

use serde::{Deserialize, Serialize};

/// Fixed frequency ranges a visualizer typically reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyBand {
    /// 20-60 Hz
    SubBass,
    /// 60-250 Hz
    Bass,
    /// 250-500 Hz
    LowMid,
    /// 500-2000 Hz
    Mid,
    /// 2000-4000 Hz
    UpperMid,
    /// 4000-6000 Hz
    High,
    /// 6000-20000 Hz
    VeryHigh,
    /// Whole audible range (0-20000 Hz), the overall output level
    Decibel,
}

impl FrequencyBand {
    pub const ALL: [FrequencyBand; 8] = [
        FrequencyBand::SubBass,
        FrequencyBand::Bass,
        FrequencyBand::LowMid,
        FrequencyBand::Mid,
        FrequencyBand::UpperMid,
        FrequencyBand::High,
        FrequencyBand::VeryHigh,
        FrequencyBand::Decibel,
    ];

    /// (low, high) edges in Hz
    pub const fn range(self) -> (f64, f64) {
        match self {
            FrequencyBand::SubBass => (20.0, 60.0),
            FrequencyBand::Bass => (60.0, 250.0),
            FrequencyBand::LowMid => (250.0, 500.0),
            FrequencyBand::Mid => (500.0, 2000.0),
            FrequencyBand::UpperMid => (2000.0, 4000.0),
            FrequencyBand::High => (4000.0, 6000.0),
            FrequencyBand::VeryHigh => (6000.0, 20000.0),
            FrequencyBand::Decibel => (0.0, 20000.0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FrequencyBand::SubBass => "SubBass",
            FrequencyBand::Bass => "Bass",
            FrequencyBand::LowMid => "LowMid",
            FrequencyBand::Mid => "Mid",
            FrequencyBand::UpperMid => "UpperMid",
            FrequencyBand::High => "High",
            FrequencyBand::VeryHigh => "VeryHigh",
            FrequencyBand::Decibel => "Decibel",
        }
    }

    /// Inclusive spectrum bin range for this band.
    ///
    /// `index = floor(freq * num_bins / nyquist)`, clamped to the spectrum.
    /// `None` when the band starts at or above Nyquist, or the spectrum is empty.
    pub fn bin_range(self, num_bins: usize, nyquist: f64) -> Option<(usize, usize)> {
        let (low, high) = self.range();
        if num_bins == 0 || nyquist <= 0.0 || low >= nyquist {
            return None;
        }
        let last = num_bins - 1;

        let to_bin = |freq: f64| -> usize {
            let index = (freq * num_bins as f64 / nyquist).floor();
            (index.max(0.0) as usize).min(last)
        };

        Some((to_bin(low), to_bin(high)))
    }
}

impl std::fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_contiguous() {
        for pair in FrequencyBand::ALL[..7].windows(2) {
            assert_eq!(pair[0].range().1, pair[1].range().0);
        }
        assert_eq!(FrequencyBand::Decibel.range(), (0.0, 20000.0));
    }

    #[test]
    fn test_bin_range_at_48k() {
        // 1024 bins over 24 kHz: 23.4375 Hz per bin
        assert_eq!(FrequencyBand::SubBass.bin_range(1024, 24000.0), Some((0, 2)));
        assert_eq!(FrequencyBand::Bass.bin_range(1024, 24000.0), Some((2, 10)));
        assert_eq!(FrequencyBand::Mid.bin_range(1024, 24000.0), Some((21, 85)));
        assert_eq!(FrequencyBand::Decibel.bin_range(1024, 24000.0), Some((0, 853)));
    }

    #[test]
    fn test_bin_range_clamps_above_nyquist() {
        // 16 kHz sample rate: VeryHigh extends past Nyquist
        assert_eq!(FrequencyBand::VeryHigh.bin_range(1024, 8000.0), Some((768, 1023)));
        assert_eq!(FrequencyBand::High.bin_range(1024, 8000.0), Some((512, 768)));
        assert_eq!(FrequencyBand::Bass.bin_range(0, 24000.0), None);
    }

    #[test]
    fn test_band_above_nyquist_is_empty() {
        // 8 kHz sample rate: nothing at or above 4 kHz exists
        assert_eq!(FrequencyBand::UpperMid.bin_range(1024, 4000.0), Some((512, 1023)));
        assert_eq!(FrequencyBand::High.bin_range(1024, 4000.0), None);
        assert_eq!(FrequencyBand::VeryHigh.bin_range(1024, 4000.0), None);
        assert_eq!(FrequencyBand::Decibel.bin_range(1024, 4000.0), Some((0, 1023)));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = FrequencyBand::ALL.iter().map(|b| b.to_string()).collect();
        assert_eq!(labels[0], "SubBass");
        assert_eq!(labels[7], "Decibel");
    }
}

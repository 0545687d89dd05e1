//! Window functions for spectral analysis
//!
//! Same set of FFT windows a game engine's audio backend offers for its
//! spectrum queries.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    /// Rectangular window (no windowing)
    Rectangular,

    /// Triangle (Bartlett) window: w[n] = 1 - |2n/(M-1) - 1|
    Triangle,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// 4-term Blackman-Harris window, ~92 dB sidelobe attenuation
    BlackmanHarris,
}

const BLACKMAN_HARRIS: [f64; 4] = [0.35875, 0.48829, 0.14128, 0.01168];

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    // Degenerate lengths would divide by M-1 = 0
    if length <= 1 || window_type == WindowType::Rectangular {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;

    (0..length)
        .map(|n| {
            let x = n as f64 / denom;
            match window_type {
                WindowType::Rectangular => 1.0,
                WindowType::Triangle => 1.0 - (2.0 * x - 1.0).abs(),
                WindowType::Hann => 0.5 - 0.5 * (2.0 * PI * x).cos(),
                WindowType::Hamming => 0.54 - 0.46 * (2.0 * PI * x).cos(),
                WindowType::Blackman => {
                    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
                }
                WindowType::BlackmanHarris => {
                    let [a0, a1, a2, a3] = BLACKMAN_HARRIS;
                    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
                        - a3 * (6.0 * PI * x).cos()
                }
            }
        })
        .collect()
}

//! Windowing functions for spectral analysis
//!
//! Applies windows to time-domain signals before FFT to reduce spectral leakage

/// Apply pre-computed window coefficients in-place
pub fn apply_coefficients_inplace(signal: &mut [f64], coefficients: &[f64]) {
    for (s, w) in signal.iter_mut().zip(coefficients.iter()) {
        *s *= w;
    }
}

/// Calculate window correction factor
///
/// When applying windows, the signal amplitude is reduced. This factor
/// (length / sum of coefficients) restores it in the FFT magnitude.
///
/// # Returns
/// Correction factor, or 0.0 for an empty or all-zero window
pub fn window_correction_factor(coefficients: &[f64]) -> f64 {
    let sum: f64 = coefficients.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }
    coefficients.len() as f64 / sum
}

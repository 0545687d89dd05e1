//! Normalization and rebinning of sample / spectrum arrays

/// Largest absolute value in `input` (0.0 for an empty slice)
pub fn max_abs(input: &[f64]) -> f64 {
    input.iter().fold(0.0_f64, |max, &x| max.max(x.abs()))
}

/// Scale `input` so its largest absolute value becomes 1.
///
/// An all-zero (or empty) input is returned unchanged instead of dividing
/// by zero.
pub fn normalize(input: &[f64]) -> Vec<f64> {
    let mut output = input.to_vec();
    normalize_inplace(&mut output);
    output
}

pub fn normalize_inplace(buffer: &mut [f64]) {
    let max = max_abs(buffer);
    if max == 0.0 || !max.is_finite() {
        return;
    }
    for x in buffer.iter_mut() {
        *x /= max;
    }
}

/// Resample `input` to exactly `num_bins` values.
///
/// * equal length: copied unchanged
/// * more bins than input: each input value is repeated across
///   `num_bins / len` consecutive bins (nearest neighbour)
/// * fewer bins: contiguous groups of `len / num_bins` inputs are
///   averaged; trailing inputs past `num_bins * group` are dropped
pub fn rebin(input: &[f64], num_bins: usize) -> Vec<f64> {
    let len = input.len();

    if num_bins == len {
        return input.to_vec();
    }
    if num_bins == 0 {
        return Vec::new();
    }
    if len == 0 {
        return vec![0.0; num_bins];
    }

    if num_bins > len {
        return (0..num_bins).map(|b| input[b * len / num_bins]).collect();
    }

    let inputs_per_bin = len / num_bins;
    input
        .chunks_exact(inputs_per_bin)
        .take(num_bins)
        .map(|group| group.iter().sum::<f64>() / inputs_per_bin as f64)
        .collect()
}

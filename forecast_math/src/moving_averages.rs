//! Averaging helpers
//!
//! Every helper here is total: empty input and non-finite results collapse to
//! `0.0` so callers never have to special-case division by zero.

use statrs::statistics::Statistics;

/// Arithmetic mean of `values`, or `0.0` when there is nothing to average
pub fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = values.mean();
    if mean.is_finite() {
        mean
    } else {
        0.0
    }
}

/// Mean of the last `window` values (or of all values when fewer are available)
pub fn trailing_mean(values: &[f64], window: usize) -> f64 {
    let start = values.len().saturating_sub(window);
    mean_or_zero(&values[start..])
}

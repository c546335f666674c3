//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: the SMA of the first `period` values. Seeding with the first value
//! instead gives different results on short series.

/// Computes the final EMA value of `values` (oldest first).
///
/// Returns `None` when there are fewer than `period` values, when `period` is
/// zero, or when any input is non-finite.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    if values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of first `period` values
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let value = values[period..]
        .iter()
        .fold(seed, |prev, &v| alpha * v + (1.0 - alpha) * prev);

    Some(value)
}

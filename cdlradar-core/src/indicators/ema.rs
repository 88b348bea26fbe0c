//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * x[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1).
//! Seed: SMA of the first `period` values.

use super::sma;

/// EMA at the end of `series`.
///
/// When the series is shorter than `period` there is no seed; the last value
/// is returned instead (or `0.0` for an empty series).
pub fn ema(series: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "EMA period must be >= 1");
    if series.len() < period {
        return series.last().copied().unwrap_or(0.0);
    }
    let k = smoothing(period);
    series[period..]
        .iter()
        .fold(sma(&series[..period], period), |prev, &x| x * k + prev * (1.0 - k))
}

/// EMA of every prefix: `result[i] == ema(&series[..=i], period)`.
///
/// Computed in a single pass. Prefixes shorter than `period` carry their own
/// last value, matching [`ema`]'s fallback.
pub fn ema_series(series: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");
    let n = series.len();
    let mut result = Vec::with_capacity(n);
    if n < period {
        result.extend_from_slice(series);
        return result;
    }

    result.extend_from_slice(&series[..period - 1]);
    let k = smoothing(period);
    let mut prev = sma(&series[..period], period);
    result.push(prev);
    for &x in &series[period..] {
        prev = x * k + prev * (1.0 - k);
        result.push(prev);
    }
    result
}

fn smoothing(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

//! Population standard deviation over a trailing window.

use super::sma;

/// Population standard deviation of the last `period` values, or `0.0` when
/// the series is shorter than `period`.
pub fn stdev(series: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "stdev period must be >= 1");
    if series.len() < period {
        return 0.0;
    }
    let window = &series[series.len() - period..];
    let mean = sma(window, period);
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    variance.sqrt()
}

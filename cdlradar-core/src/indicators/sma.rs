//! Simple Moving Average (SMA).
//!
//! Mean of the trailing `period` values.

/// SMA of the last `period` values of `series`, or `0.0` when the series is
/// shorter than `period`.
pub fn sma(series: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "SMA period must be >= 1");
    if series.len() < period {
        return 0.0;
    }
    let window = &series[series.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_uses_trailing_window() {
        let series = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        // mean(12..=16) = 14
        assert_approx(sma(&series, 5), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_exact_length_is_full_mean() {
        assert_approx(sma(&[2.0, 4.0, 6.0], 3), 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_last_value() {
        assert_approx(sma(&[100.0, 200.0, 300.0], 1), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_too_short_is_zero() {
        assert_eq!(sma(&[10.0, 11.0], 5), 0.0);
        assert_eq!(sma(&[], 1), 0.0);
    }

    #[test]
    #[should_panic(expected = "period must be >= 1")]
    fn sma_zero_period_panics() {
        sma(&[1.0], 0);
    }
}

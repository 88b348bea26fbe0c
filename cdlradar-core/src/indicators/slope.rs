//! Slope angle of a series, in degrees.

/// `atan((last - series[len - period]) / period)` in degrees, or `0.0` when
/// the series is shorter than `period`.
///
/// The rise is measured over `period - 1` steps but divided by `period`; the
/// 30° momentum threshold is calibrated against exactly this formula.
pub fn slope(series: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "slope period must be >= 1");
    let n = series.len();
    if n < period {
        return 0.0;
    }
    let rise = series[n - 1] - series[n - period];
    (rise / period as f64).atan().to_degrees()
}

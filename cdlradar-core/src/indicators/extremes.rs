//! Rolling highest / lowest over a trailing window.
//!
//! A series shorter than `period` is scanned whole. An empty series yields
//! the identity of the fold (`-inf` for highest, `+inf` for lowest).

fn trailing(series: &[f64], period: usize) -> &[f64] {
    assert!(period >= 1, "extreme period must be >= 1");
    &series[series.len().saturating_sub(period)..]
}

/// Maximum of the last `period` values.
pub fn highest(series: &[f64], period: usize) -> f64 {
    trailing(series, period)
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Minimum of the last `period` values.
pub fn lowest(series: &[f64], period: usize) -> f64 {
    trailing(series, period)
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min)
}

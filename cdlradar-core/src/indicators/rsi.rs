//! Relative Strength Index (RSI), simple-average variant.
//!
//! Gains and losses are summed over the last `period` deltas and each
//! divided by `period`. No Wilder smoothing.

/// RSI at the end of `series`.
///
/// Returns `50.0` when there are not more than `period` values, and `100.0`
/// when the window contains no losses.
pub fn rsi(series: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "RSI period must be >= 1");
    let n = series.len();
    if n <= period {
        return 50.0;
    }

    let (gains, losses) = series[n - period - 1..]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(g, l), diff| {
            if diff >= 0.0 {
                (g + diff, l)
            } else {
                (g, l - diff)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

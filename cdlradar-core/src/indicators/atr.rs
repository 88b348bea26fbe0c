//! True range and Average True Range (ATR).
//!
//! TR = max(high - low, |high - prev_close|, |low - prev_close|), or
//! high - low without a previous candle. ATR is a simple average of the
//! trailing true ranges (no Wilder smoothing).

use crate::domain::Candle;

use super::sma;

/// True range of `current` given the previous candle, if any.
pub fn true_range(current: &Candle, previous: Option<&Candle>) -> f64 {
    let hl = current.high - current.low;
    match previous {
        None => hl,
        Some(prev) => {
            let hpc = (current.high - prev.close).abs();
            let lpc = (current.low - prev.close).abs();
            hl.max(hpc).max(lpc)
        }
    }
}

/// True range of every candle; the first uses `high - low`.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, c)| true_range(c, i.checked_sub(1).map(|p| &candles[p])))
        .collect()
}

/// SMA of the last `period` true ranges, excluding the first candle's.
///
/// Returns `0.0` with fewer than `period + 1` candles.
pub fn atr(candles: &[Candle], period: usize) -> f64 {
    assert!(period >= 1, "ATR period must be >= 1");
    if candles.len() < period + 1 {
        return 0.0;
    }
    let trs = true_ranges(candles);
    sma(&trs[1..], period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn true_range_without_previous_is_range() {
        let candles = make_candles(&[100.0]);
        assert_approx(true_range(&candles[0], None), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_uses_gap_from_previous_close() {
        let mut candles = make_candles(&[100.0, 101.0]);
        // gap up: previous close 100, current bar 110..112
        candles[1].low = 110.0;
        candles[1].high = 112.0;
        assert_approx(
            true_range(&candles[1], Some(&candles[0])),
            12.0,
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn true_ranges_len_matches_input() {
        let candles = make_candles(&[100.0, 102.0, 101.0]);
        let trs = true_ranges(&candles);
        assert_eq!(trs.len(), 3);
        // make_candles: high = max(o,c)+1, low = min(o,c)-1 → |c - o| + 2
        assert_approx(trs[0], 2.0, DEFAULT_EPSILON);
        assert_approx(trs[1], 4.0, DEFAULT_EPSILON);
        assert_approx(trs[2], 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_needs_period_plus_one_candles() {
        let candles = make_candles(&[100.0, 101.0, 102.0]);
        assert_eq!(atr(&candles, 3), 0.0);
        let candles = make_candles(&[100.0, 101.0, 102.0, 103.0]);
        // all three TRs after the first are 3.0
        assert_approx(atr(&candles, 3), 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_excludes_first_true_range() {
        let mut candles = make_candles(&[100.0, 100.0, 100.0]);
        candles[0].high = 150.0;
        // only TR[1] and TR[2] count: each 2.0 (prev close 100, range 99..101)
        assert_approx(atr(&candles, 2), 2.0, DEFAULT_EPSILON);
    }
}

//! Fixed-factor candle aggregation.

use crate::domain::Candle;

/// Aggregate consecutive runs of `factor` candles into one.
///
/// Each output candle takes `datetime` and `open` from the first candle of its
/// chunk, `close` from the last, `high`/`low` as the chunk extremes and
/// `volume` as the chunk sum. The trailing chunk may be short; it is still
/// emitted. Output length is `ceil(len / factor)`.
///
/// Chunks are aligned to the start of the slice, not to clock boundaries.
/// Derived tiers are always built from the base series directly.
pub fn resample(candles: &[Candle], factor: usize) -> Vec<Candle> {
    assert!(factor >= 1, "resample factor must be >= 1");
    if factor == 1 {
        return candles.to_vec();
    }
    candles.chunks(factor).filter_map(aggregate).collect()
}

fn aggregate(chunk: &[Candle]) -> Option<Candle> {
    let first = chunk.first()?;
    let last = chunk.last()?;
    let (high, low, volume) = chunk.iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY, 0u64),
        |(h, l, v), c| (h.max(c.high), l.min(c.low), v.saturating_add(c.volume)),
    );
    Some(Candle {
        datetime: first.datetime,
        open: first.open,
        high,
        low,
        close: last.close,
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn resample_aggregates_chunks() {
        let mut candles = make_candles(&[10.0, 12.0, 11.0, 15.0, 14.0]);
        for (i, c) in candles.iter_mut().enumerate() {
            c.volume = (i as u64 + 1) * 10;
        }
        let out = resample(&candles, 3);
        assert_eq!(out.len(), 2);

        let first = &out[0];
        assert_eq!(first.datetime, candles[0].datetime);
        assert_eq!(first.open, candles[0].open);
        assert_eq!(first.close, 11.0);
        assert_eq!(first.high, 13.0);
        assert_eq!(first.low, 9.0);
        assert_eq!(first.volume, 60);

        let tail = &out[1];
        assert_eq!(tail.datetime, candles[3].datetime);
        assert_eq!(tail.open, 11.0);
        assert_eq!(tail.close, 14.0);
        assert_eq!(tail.volume, 90);
    }

    #[test]
    fn resample_factor_one_is_copy() {
        let candles = make_candles(&[1.0, 2.0, 3.0]);
        assert_eq!(resample(&candles, 1), candles);
    }

    #[test]
    fn resample_empty_is_empty() {
        assert!(resample(&[], 12).is_empty());
    }

    #[test]
    fn resample_factor_larger_than_input_yields_one_candle() {
        let candles = make_candles(&[5.0, 6.0]);
        let out = resample(&candles, 48);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].close, 6.0);
    }

    #[test]
    fn nested_resampling_matches_direct_when_chunks_align() {
        let closes: Vec<f64> = (0..29).map(|i| 100.0 + (i % 7) as f64).collect();
        let candles = make_candles(&closes);
        assert_eq!(resample(&resample(&candles, 3), 4), resample(&candles, 12));
    }

    #[test]
    fn nested_resampling_differs_when_inner_factor_does_not_divide() {
        let closes: Vec<f64> = (0..24).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        // 5-candle chunks regrouped by 2 straddle the 12-candle boundaries
        assert_ne!(resample(&resample(&candles, 5), 2), resample(&candles, 12));
    }

    #[test]
    #[should_panic(expected = "factor must be >= 1")]
    fn resample_zero_factor_panics() {
        resample(&make_candles(&[1.0]), 0);
    }
}

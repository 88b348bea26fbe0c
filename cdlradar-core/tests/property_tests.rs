//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Resampling exactness: length, extremes, volume and boundary prices
//! 2. Resampling with factor 1 is the identity
//! 3. Fusion majority rule
//! 4. Scorer bounds and the golden-rule gate
//! 5. Prefix EMA series agrees with the single-value EMA

use chrono::NaiveDate;
use proptest::prelude::*;
use cdlradar_core::components::{fuse_votes, majority_threshold, score, GOLDEN_RULE_SCORE};
use cdlradar_core::data::{resample, TimeframeSeries};
use cdlradar_core::domain::{ActionType, Candle, SignalMap, SignalType, Timeframe};
use cdlradar_core::indicators::{ema, ema_series};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_candle_fields() -> impl Strategy<Value = (f64, f64, f64, u64)> {
    (10.0..500.0_f64, 0.0..5.0_f64, 0.0..5.0_f64, 0..100_000u64)
}

fn arb_candles(max_len: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(arb_candle_fields(), 0..max_len).prop_map(|rows| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        rows.into_iter()
            .enumerate()
            .map(|(i, (close, up, down, volume))| {
                let open = close + (up - down) / 2.0;
                Candle::new(
                    start + chrono::Duration::minutes(5 * i as i64),
                    open,
                    open.max(close) + up,
                    open.min(close) - down,
                    close,
                    volume,
                )
            })
            .collect()
    })
}

fn arb_signal() -> impl Strategy<Value = SignalType> {
    prop_oneof![
        Just(SignalType::Buy),
        Just(SignalType::Sale),
        Just(SignalType::Neutral),
    ]
}

// ── 1. Resampling exactness ──────────────────────────────────────────

proptest! {
    /// Output length is ceil(len / factor).
    #[test]
    fn resample_length_is_ceiling(candles in arb_candles(200), factor in 1usize..60) {
        let out = resample(&candles, factor);
        prop_assert_eq!(out.len(), candles.len().div_ceil(factor));
    }

    /// Every output candle is its chunk's extremes, volume sum and boundary
    /// prices, exactly.
    #[test]
    fn resample_preserves_chunk_aggregates(candles in arb_candles(200), factor in 2usize..60) {
        let out = resample(&candles, factor);
        for (agg, chunk) in out.iter().zip(candles.chunks(factor)) {
            let high = chunk.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
            let low = chunk.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            let volume: u64 = chunk.iter().map(|c| c.volume).sum();
            prop_assert_eq!(agg.high, high);
            prop_assert_eq!(agg.low, low);
            prop_assert_eq!(agg.volume, volume);
            prop_assert_eq!(agg.open, chunk[0].open);
            prop_assert_eq!(agg.close, chunk[chunk.len() - 1].close);
            prop_assert_eq!(agg.datetime, chunk[0].datetime);
        }
    }

    /// Total volume survives aggregation.
    #[test]
    fn resample_conserves_volume(candles in arb_candles(200), factor in 1usize..60) {
        let before: u64 = candles.iter().map(|c| c.volume).sum();
        let after: u64 = resample(&candles, factor).iter().map(|c| c.volume).sum();
        prop_assert_eq!(before, after);
    }
}

// ── 2. Identity ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn resample_factor_one_is_identity(candles in arb_candles(100)) {
        prop_assert_eq!(resample(&candles, 1), candles);
    }
}

// ── 3. Fusion majority rule ──────────────────────────────────────────

proptest! {
    /// A side wins only with a strict majority of all votes, neutral
    /// votes included.
    #[test]
    fn fusion_requires_strict_majority(votes in prop::collection::vec(arb_signal(), 0..9)) {
        let fused = fuse_votes(&votes);
        let buys = votes.iter().filter(|v| **v == SignalType::Buy).count();
        let sales = votes.iter().filter(|v| **v == SignalType::Sale).count();
        let threshold = majority_threshold(votes.len());
        match fused {
            SignalType::Buy => prop_assert!(buys >= threshold),
            SignalType::Sale => prop_assert!(sales >= threshold),
            SignalType::Neutral => prop_assert!(buys < threshold && sales < threshold),
        }
        prop_assert!(2 * threshold > votes.len());
    }

    /// Unanimous non-neutral votes always win.
    #[test]
    fn unanimous_votes_win(side in arb_signal(), n in 1usize..9) {
        prop_assert_eq!(fuse_votes(&vec![side; n]), side);
    }
}

// ── 4. Scorer bounds ─────────────────────────────────────────────────

proptest! {
    /// Score stays in 0..=100, equals its breakdown, and only the golden
    /// rule enters.
    #[test]
    fn score_is_bounded_and_gated(
        candles in arb_candles(120),
        base in arb_signal(),
        h4 in arb_signal(),
        h1 in arb_signal(),
        m15 in arb_signal(),
    ) {
        let series = TimeframeSeries::from_base(&candles, None);
        let fused: SignalMap = [
            (Timeframe::Min5, base),
            (Timeframe::Min15, m15),
            (Timeframe::Hour1, h1),
            (Timeframe::Hour4, h4),
        ]
        .into_iter()
        .collect();
        let verdict = score(&series, base, &fused, false);

        prop_assert!(verdict.score <= 100);
        prop_assert_eq!(verdict.score, verdict.breakdown.total());
        prop_assert_eq!(
            verdict.action == ActionType::EnterNow,
            verdict.score >= GOLDEN_RULE_SCORE
        );
        if base.is_neutral() {
            prop_assert_eq!(verdict.action, ActionType::NoAction);
            prop_assert_eq!(verdict.score, 0);
        }
    }
}

// ── 5. EMA prefix series ─────────────────────────────────────────────

proptest! {
    #[test]
    fn ema_series_matches_prefix_ema(
        series in prop::collection::vec(-1000.0..1000.0_f64, 0..80),
        period in 1usize..30,
    ) {
        let all = ema_series(&series, period);
        prop_assert_eq!(all.len(), series.len());
        for (i, value) in all.iter().enumerate() {
            let single = ema(&series[..=i], period);
            prop_assert!((value - single).abs() < 1e-9, "prefix {i}: {value} vs {single}");
        }
    }
}

//! Power score: four additive filters gating the trade action.
//!
//! | Filter | Points |
//! |---|---|
//! | Multi-timeframe alignment | 0 / 30 / 40 |
//! | Relative volume | 0 / 15 / 30 |
//! | Volatility expansion | 0 / 20 |
//! | Momentum slope | 0 / 10 |
//!
//! Only a score of at least [`GOLDEN_RULE_SCORE`] enters.

use serde::{Deserialize, Serialize};

use crate::data::TimeframeSeries;
use crate::domain::{candle, ActionType, Candle, ScoreBreakdown, SignalMap, SignalType, Timeframe};
use crate::indicators::{atr, ema_series, slope, sma, true_ranges};

/// Minimum power score for `EnterNow`.
pub const GOLDEN_RULE_SCORE: u8 = 85;

/// Aligned setups at or above this score are worth watching.
pub const WATCH_SCORE: u8 = 60;

/// Fewest base candles the filters are computed on.
pub const MIN_SCORING_CANDLES: usize = 30;

const VOLUME_WINDOW: usize = 20;
const VOLUME_SURGE: f64 = 1.5;
const ATR_PERIOD: usize = 14;
const TRUE_RANGE_WINDOW: usize = 20;
const MOMENTUM_EMA: usize = 8;
const MOMENTUM_WARMUP: usize = 21;
const SLOPE_PERIOD: usize = 5;
const SLOPE_THRESHOLD_DEG: f64 = 30.0;

/// How a scored setup reads. Every class except `GoldenRule` maps to `Wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setup {
    /// No base signal or too little history.
    Inactive,
    GoldenRule,
    /// Aligned with the macro trend and at least [`WATCH_SCORE`].
    Watch,
    /// Base signal opposes an established macro trend.
    CounterTrend,
    Weak,
}

/// Scorer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub action: ActionType,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub setup: Setup,
}

impl Verdict {
    fn inactive() -> Self {
        Self {
            action: ActionType::NoAction,
            score: 0,
            breakdown: ScoreBreakdown::default(),
            setup: Setup::Inactive,
        }
    }
}

/// The 4h signal when the 1h tier agrees with it and it is not neutral.
pub fn macro_trend(fused: &SignalMap) -> Option<SignalType> {
    let h4 = fused.get(&Timeframe::Hour4).copied().unwrap_or_default();
    let h1 = fused.get(&Timeframe::Hour1).copied().unwrap_or_default();
    (h4 == h1 && !h4.is_neutral()).then_some(h4)
}

/// Alignment points: 30 when the macro trend matches the base signal (and,
/// in precision mode, the 30-second tier does too), plus 10 when the
/// 15-minute tier also matches.
pub fn alignment_points(base_signal: SignalType, fused: &SignalMap, precision_mode: bool) -> u8 {
    if macro_trend(fused) != Some(base_signal) {
        return 0;
    }
    let fine_tier = fused.get(&Timeframe::Sec30).copied().unwrap_or_default();
    if precision_mode && fine_tier != base_signal {
        return 0;
    }
    let m15 = fused.get(&Timeframe::Min15).copied().unwrap_or_default();
    if m15 == base_signal {
        40
    } else {
        30
    }
}

/// Relative-volume points: 30 at 1.5× the 20-candle average, 15 at 1×.
pub fn volume_points(base: &[Candle]) -> u8 {
    let Some(last) = base.last() else {
        return 0;
    };
    let current = last.volume as f64;
    let average = sma(&candle::volumes(base), VOLUME_WINDOW);
    if current >= average * VOLUME_SURGE {
        30
    } else if current >= average {
        15
    } else {
        0
    }
}

/// Volatility points: 20 when ATR(14) exceeds the 20-candle mean true range.
pub fn volatility_points(base: &[Candle]) -> u8 {
    let current = atr(base, ATR_PERIOD);
    let average = sma(&true_ranges(base), TRUE_RANGE_WINDOW);
    if current > average {
        20
    } else {
        0
    }
}

/// Momentum points: 10 when the EMA(8) slope is steeper than 30° either way.
pub fn momentum_points(base: &[Candle]) -> u8 {
    if base.len() < MOMENTUM_WARMUP {
        return 0;
    }
    let ema = ema_series(&candle::closes(base), MOMENTUM_EMA);
    let angle = slope(&ema[MOMENTUM_WARMUP - 1..], SLOPE_PERIOD);
    if angle.abs() > SLOPE_THRESHOLD_DEG {
        10
    } else {
        0
    }
}

/// Score the fused signals against the base series.
pub fn score(
    series: &TimeframeSeries,
    base_signal: SignalType,
    fused: &SignalMap,
    precision_mode: bool,
) -> Verdict {
    let base = series.base();
    if base_signal.is_neutral() || base.len() < MIN_SCORING_CANDLES {
        return Verdict::inactive();
    }

    let breakdown = ScoreBreakdown {
        alignment: alignment_points(base_signal, fused, precision_mode),
        volume: volume_points(base),
        volatility: volatility_points(base),
        momentum: momentum_points(base),
    };
    let score = breakdown.total();
    let trend = macro_trend(fused);

    let setup = if score >= GOLDEN_RULE_SCORE {
        Setup::GoldenRule
    } else if score >= WATCH_SCORE && trend == Some(base_signal) {
        Setup::Watch
    } else if trend.is_some() && trend != Some(base_signal) {
        Setup::CounterTrend
    } else {
        Setup::Weak
    };
    let action = match setup {
        Setup::GoldenRule => ActionType::EnterNow,
        _ => ActionType::Wait,
    };

    Verdict {
        action,
        score,
        breakdown,
        setup,
    }
}

//! The per-instrument result record handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActionType, SignalMap, SignalType, Timeframe};

/// Points contributed by each scoring filter.
///
/// The power score is the plain sum of these four fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Multi-timeframe alignment: 0, 30 or 40.
    pub alignment: u8,
    /// Relative volume: 0, 15 or 30.
    pub volume: u8,
    /// Volatility expansion: 0 or 20.
    pub volatility: u8,
    /// Momentum slope: 0 or 10.
    pub momentum: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.alignment + self.volume + self.volatility + self.momentum
    }
}

/// Fused multi-timeframe recommendation for one instrument.
///
/// Built fresh on every evaluation and never mutated by the engine; the next
/// cycle's record supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTimeframeAnalysis {
    pub symbol: String,
    /// Last base close, or 0 when there were no candles.
    pub price: f64,
    pub signals: SignalMap,
    pub action: ActionType,
    /// Fused signal of the base tier.
    pub main_signal: SignalType,
    pub last_updated: DateTime<Utc>,
    /// 0..=100.
    pub power_score: u8,
    pub precision_mode: bool,
    pub breakdown: ScoreBreakdown,
}

impl MultiTimeframeAnalysis {
    /// Fused signal for `timeframe`, `Neutral` when the tier was not evaluated.
    pub fn signal(&self, timeframe: Timeframe) -> SignalType {
        self.signals.get(&timeframe).copied().unwrap_or_default()
    }

    /// Copy of this record with a caller-side action override applied.
    pub fn with_action(mut self, action: ActionType) -> Self {
        self.action = action;
        self
    }
}

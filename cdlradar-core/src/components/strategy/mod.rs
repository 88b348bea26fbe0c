//! Strategy evaluators: per-timeframe directional votes.
//!
//! Evaluators are stateless and only see the candle slice they are handed.
//! Insufficient history is answered with `Neutral`, never an error.

pub mod ma_crossover;
pub mod macd;
pub mod squeeze_momentum;
pub mod swing_structure;
pub mod trend_rsi;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::TimeframeSeries;
use crate::domain::{Candle, SignalMap, SignalType};

pub use ma_crossover::MaCrossover;
pub use macd::MacdCrossover;
pub use squeeze_momentum::SqueezeMomentum;
pub use swing_structure::SwingStructure;
pub use trend_rsi::TrendRsi;

/// Trait for strategy evaluators.
pub trait StrategyEvaluator: Send + Sync {
    /// Human-readable name (e.g., "swing_structure").
    fn name(&self) -> &str;

    /// Fewest candles for which `signal` can vote; below it the vote is
    /// always `Neutral`.
    fn min_history(&self) -> usize;

    /// Vote on one timeframe's candles.
    fn signal(&self, candles: &[Candle]) -> SignalType;

    /// Vote on every timeframe present in `series`.
    fn evaluate(&self, series: &TimeframeSeries) -> SignalMap {
        series
            .iter()
            .map(|(tf, candles)| (tf, self.signal(candles)))
            .collect()
    }
}

/// The closed set of evaluators a configuration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    MaCrossover,
    SwingStructure,
    SqueezeMomentum,
    Macd,
    TrendRsi,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::MaCrossover,
        StrategyKind::SwingStructure,
        StrategyKind::SqueezeMomentum,
        StrategyKind::Macd,
        StrategyKind::TrendRsi,
    ];

    /// The precision screener: structure, squeeze and MACD.
    pub const DEFAULT_ENSEMBLE: [StrategyKind; 3] = [
        StrategyKind::SwingStructure,
        StrategyKind::SqueezeMomentum,
        StrategyKind::Macd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::MaCrossover => "ma_crossover",
            StrategyKind::SwingStructure => "swing_structure",
            StrategyKind::SqueezeMomentum => "squeeze_momentum",
            StrategyKind::Macd => "macd",
            StrategyKind::TrendRsi => "trend_rsi",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = super::factory::FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| super::factory::FactoryError::UnknownStrategy(s.to_string()))
    }
}

/// Null evaluator: always abstains. Used as a stub in tests.
pub struct NullStrategy;

impl StrategyEvaluator for NullStrategy {
    fn name(&self) -> &str {
        "null"
    }

    fn min_history(&self) -> usize {
        0
    }

    fn signal(&self, _candles: &[Candle]) -> SignalType {
        SignalType::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timeframe;
    use crate::indicators::make_candles;

    #[test]
    fn kind_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert!("zen".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn default_evaluate_covers_every_present_tier() {
        let base = make_candles(&[1.0; 10]);
        let series = TimeframeSeries::from_base(&base, Some(Vec::new()));
        let map = NullStrategy.evaluate(&series);
        assert_eq!(map.len(), 5);
        assert!(map.values().all(SignalType::is_neutral));
        assert!(map.contains_key(&Timeframe::Sec30));
    }

    #[test]
    fn every_evaluator_abstains_below_min_history() {
        let evaluators: Vec<Box<dyn StrategyEvaluator>> = vec![
            Box::new(MaCrossover::default()),
            Box::new(SwingStructure::default()),
            Box::new(SqueezeMomentum::default()),
            Box::new(MacdCrossover::default()),
            Box::new(TrendRsi::default()),
        ];
        for ev in &evaluators {
            let closes: Vec<f64> = (0..ev.min_history().saturating_sub(1))
                .map(|i| 100.0 + i as f64)
                .collect();
            assert_eq!(
                ev.signal(&make_candles(&closes)),
                SignalType::Neutral,
                "{} voted with {} candles",
                ev.name(),
                closes.len()
            );
            assert_eq!(ev.signal(&[]), SignalType::Neutral);
        }
    }
}

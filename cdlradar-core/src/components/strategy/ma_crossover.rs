//! Fast/slow simple moving average comparison.

use crate::domain::{candle, Candle, SignalType};
use crate::indicators::sma;

use super::StrategyEvaluator;

/// Votes `Buy` while SMA(fast) is above SMA(slow), `Sale` otherwise.
///
/// Never abstains once it has `slow_period` candles; equal averages count
/// as `Sale`.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl MaCrossover {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(fast_period >= 1, "fast_period must be >= 1");
        assert!(
            slow_period > fast_period,
            "slow_period must be > fast_period"
        );
        Self {
            fast_period,
            slow_period,
        }
    }
}

impl Default for MaCrossover {
    fn default() -> Self {
        Self::new(8, 21)
    }
}

impl StrategyEvaluator for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn min_history(&self) -> usize {
        self.slow_period
    }

    fn signal(&self, candles: &[Candle]) -> SignalType {
        if candles.len() < self.min_history() {
            return SignalType::Neutral;
        }
        let closes = candle::closes(candles);
        if sma(&closes, self.fast_period) > sma(&closes, self.slow_period) {
            SignalType::Buy
        } else {
            SignalType::Sale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn rising_closes_buy() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert_eq!(MaCrossover::default().signal(&make_candles(&closes)), SignalType::Buy);
    }

    #[test]
    fn falling_closes_sell() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        assert_eq!(MaCrossover::default().signal(&make_candles(&closes)), SignalType::Sale);
    }

    #[test]
    fn flat_closes_sell() {
        assert_eq!(
            MaCrossover::default().signal(&make_candles(&[50.0; 21])),
            SignalType::Sale
        );
    }

    #[test]
    fn twenty_candles_abstain() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(
            MaCrossover::default().signal(&make_candles(&closes)),
            SignalType::Neutral
        );
    }

    #[test]
    #[should_panic(expected = "slow_period must be > fast_period")]
    fn slow_must_exceed_fast() {
        MaCrossover::new(10, 10);
    }
}

//! MACD line versus its signal line.

use crate::domain::{candle, Candle, SignalType};
use crate::indicators::{ema_series, sma};

use super::StrategyEvaluator;

/// Votes `Buy` when the latest MACD value is above the SMA of the MACD
/// series, `Sale` when below.
///
/// The MACD series starts at the first prefix with `slow` candles.
#[derive(Debug, Clone)]
pub struct MacdCrossover {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdCrossover {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(slow > fast, "slow period must be > fast period");
        Self { fast, slow, signal }
    }

    /// MACD value of every prefix of length `slow..=n`.
    pub fn macd_series(&self, candles: &[Candle]) -> Vec<f64> {
        let closes = candle::closes(candles);
        if closes.len() < self.slow {
            return Vec::new();
        }
        let fast = ema_series(&closes, self.fast);
        let slow = ema_series(&closes, self.slow);
        fast[self.slow - 1..]
            .iter()
            .zip(&slow[self.slow - 1..])
            .map(|(f, s)| f - s)
            .collect()
    }
}

impl Default for MacdCrossover {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl StrategyEvaluator for MacdCrossover {
    fn name(&self) -> &str {
        "macd"
    }

    fn min_history(&self) -> usize {
        self.slow + 4
    }

    fn signal(&self, candles: &[Candle]) -> SignalType {
        if candles.len() < self.min_history() {
            return SignalType::Neutral;
        }
        let macd = self.macd_series(candles);
        let Some(&last) = macd.last() else {
            return SignalType::Neutral;
        };
        let signal_line = sma(&macd, self.signal);
        if last > signal_line {
            SignalType::Buy
        } else if last < signal_line {
            SignalType::Sale
        } else {
            SignalType::Neutral
        }
    }
}

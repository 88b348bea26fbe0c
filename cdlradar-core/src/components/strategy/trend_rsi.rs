//! Trend filter: price versus its SMA, confirmed by RSI.

use crate::domain::{candle, Candle, SignalType};
use crate::indicators::{rsi, sma};

use super::StrategyEvaluator;

#[derive(Debug, Clone)]
pub struct TrendRsi {
    pub sma_period: usize,
    pub rsi_period: usize,
}

impl TrendRsi {
    pub fn new(sma_period: usize, rsi_period: usize) -> Self {
        assert!(sma_period >= 1 && rsi_period >= 1, "periods must be >= 1");
        Self {
            sma_period,
            rsi_period,
        }
    }
}

impl Default for TrendRsi {
    fn default() -> Self {
        Self::new(20, 14)
    }
}

impl StrategyEvaluator for TrendRsi {
    fn name(&self) -> &str {
        "trend_rsi"
    }

    fn min_history(&self) -> usize {
        self.sma_period
    }

    fn signal(&self, candles: &[Candle]) -> SignalType {
        if candles.len() < self.min_history() {
            return SignalType::Neutral;
        }
        let closes = candle::closes(candles);
        let price = closes[closes.len() - 1];
        let average = sma(&closes, self.sma_period);
        let strength = rsi(&closes, self.rsi_period);

        if price > average && strength > 50.0 {
            SignalType::Buy
        } else if price < average && strength < 50.0 {
            SignalType::Sale
        } else {
            SignalType::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn uptrend_buys() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert_eq!(TrendRsi::default().signal(&make_candles(&closes)), SignalType::Buy);
    }

    #[test]
    fn downtrend_sells() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        assert_eq!(TrendRsi::default().signal(&make_candles(&closes)), SignalType::Sale);
    }

    #[test]
    fn disagreement_abstains() {
        // long rise keeps price above its SMA while the last 14 deltas are all losses
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + 3.0 * i as f64).collect();
        let top = *closes.last().unwrap();
        closes.extend((1..=14).map(|i| top - 0.1 * i as f64));
        let candles = make_candles(&closes);
        assert_eq!(TrendRsi::default().signal(&candles), SignalType::Neutral);
    }

    #[test]
    fn flat_abstains() {
        assert_eq!(TrendRsi::default().signal(&make_candles(&[42.0; 25])), SignalType::Neutral);
    }
}

//! Squeeze momentum: sign of the regressed distance from the range midline.
//!
//! For every prefix with at least `length` candles, momentum is the close
//! minus the average of the Donchian midline and the SMA. The vote is the
//! sign of a linear regression over the last `length` momentum samples.

use crate::domain::{candle, Candle, SignalType};
use crate::indicators::{highest, linreg, lowest, sma};

use super::StrategyEvaluator;

#[derive(Debug, Clone)]
pub struct SqueezeMomentum {
    pub length: usize,
}

impl SqueezeMomentum {
    pub fn new(length: usize) -> Self {
        assert!(length >= 1, "squeeze length must be >= 1");
        Self { length }
    }

    /// Momentum of every prefix of length `length..=n`.
    pub fn momentum(&self, candles: &[Candle]) -> Vec<f64> {
        let closes = candle::closes(candles);
        let highs = candle::highs(candles);
        let lows = candle::lows(candles);
        (self.length..=candles.len())
            .map(|end| {
                let midline =
                    (highest(&highs[..end], self.length) + lowest(&lows[..end], self.length)) / 2.0;
                let basis = (midline + sma(&closes[..end], self.length)) / 2.0;
                closes[end - 1] - basis
            })
            .collect()
    }
}

impl Default for SqueezeMomentum {
    fn default() -> Self {
        Self::new(20)
    }
}

impl StrategyEvaluator for SqueezeMomentum {
    fn name(&self) -> &str {
        "squeeze_momentum"
    }

    /// Three candles are accepted, but fewer than `2 * length - 1` candles
    /// leave the regression short and the vote neutral.
    fn min_history(&self) -> usize {
        3
    }

    fn signal(&self, candles: &[Candle]) -> SignalType {
        if candles.len() < self.min_history() {
            return SignalType::Neutral;
        }
        SignalType::from_sign(linreg(&self.momentum(candles), self.length))
    }
}

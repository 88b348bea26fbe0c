//! Market-structure bias from confirmed swing breaks.
//!
//! Swings are fractal highs/lows confirmed `swing` candles after the fact.
//! A close through the last swing high latches a bullish bias; a close
//! through the last swing low latches a bearish one. A latch only flips when
//! the opposite side breaks.

use crate::domain::{Candle, SignalType};
use crate::indicators::{fractal_high, fractal_low};

use super::StrategyEvaluator;

#[derive(Debug, Clone)]
pub struct SwingStructure {
    pub swing: usize,
    min_history: usize,
}

impl SwingStructure {
    pub fn new(swing: usize) -> Self {
        assert!(swing >= 1, "swing length must be >= 1");
        Self {
            swing,
            min_history: 3 * swing,
        }
    }
}

impl Default for SwingStructure {
    fn default() -> Self {
        Self::new(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Latch {
    Flat,
    Long,
    Short,
}

#[derive(Debug, Clone, Copy)]
struct Structure {
    swing_high: f64,
    swing_low: f64,
    latch: Latch,
}

impl StrategyEvaluator for SwingStructure {
    fn name(&self) -> &str {
        "swing_structure"
    }

    fn min_history(&self) -> usize {
        self.min_history
    }

    fn signal(&self, candles: &[Candle]) -> SignalType {
        if candles.len() < self.min_history() {
            return SignalType::Neutral;
        }
        let initial = Structure {
            swing_high: candles[0].high,
            swing_low: candles[0].low,
            latch: Latch::Flat,
        };

        let end = (self.swing..candles.len()).fold(initial, |mut s, i| {
            let pivot = i - self.swing;
            if fractal_high(candles, pivot, self.swing) {
                s.swing_high = candles[pivot].high;
            }
            if fractal_low(candles, pivot, self.swing) {
                s.swing_low = candles[pivot].low;
            }

            let close = candles[i].close;
            if close > s.swing_high && s.latch != Latch::Long {
                s.latch = Latch::Long;
            } else if close < s.swing_low && s.latch != Latch::Short {
                s.latch = Latch::Short;
            }
            s
        });

        match end.latch {
            Latch::Flat => SignalType::Neutral,
            Latch::Long => SignalType::Buy,
            Latch::Short => SignalType::Sale,
        }
    }
}

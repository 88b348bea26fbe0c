//! Deterministic synthetic candles for demos and tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::domain::{Candle, Timeframe};
use crate::rng::SeedHierarchy;

use super::provider::{CandleError, CandleSupplier};

/// Random-walk supplier seeded per (symbol, interval).
///
/// The same symbol always yields the same series; the series ends at a fixed
/// anchor so repeated fetches are identical.
#[derive(Debug, Clone)]
pub struct SyntheticSupplier {
    seeds: SeedHierarchy,
    end: NaiveDateTime,
    start_price: f64,
    /// Per-step drift as a fraction of price.
    drift: f64,
    /// Per-step volatility as a fraction of price.
    volatility: f64,
}

impl Default for SyntheticSupplier {
    fn default() -> Self {
        let end = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(21, 0, 0))
            .unwrap_or_default();
        Self {
            seeds: SeedHierarchy::new(42),
            end,
            start_price: 100.0,
            drift: 0.0,
            volatility: 0.002,
        }
    }
}

impl SyntheticSupplier {
    pub fn new(master_seed: u64) -> Self {
        Self {
            seeds: SeedHierarchy::new(master_seed),
            ..Self::default()
        }
    }

    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Generate `count` candles for `symbol` at `interval`.
    pub fn generate(&self, symbol: &str, interval: Timeframe, count: usize) -> Vec<Candle> {
        let mut rng = self.seeds.rng_for(symbol, interval);
        let step = Duration::seconds(interval.seconds() as i64);
        let start = self.end - step * (count.saturating_sub(1) as i32);
        let mut close = self.start_price;

        (0..count)
            .map(|i| {
                let open = close;
                let shock: f64 = rng.gen_range(-1.0..1.0);
                close = (open * (1.0 + self.drift + self.volatility * shock)).max(0.01);
                let wick_up: f64 = rng.gen_range(0.0..1.0) * self.volatility * open;
                let wick_down: f64 = rng.gen_range(0.0..1.0) * self.volatility * open;
                Candle {
                    datetime: start + step * i as i32,
                    open,
                    high: open.max(close) + wick_up,
                    low: (open.min(close) - wick_down).max(0.0),
                    close,
                    volume: rng.gen_range(500..5_000),
                }
            })
            .collect()
    }
}

impl CandleSupplier for SyntheticSupplier {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn try_fetch(
        &self,
        symbol: &str,
        interval: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, CandleError> {
        Ok(self.generate(symbol, interval, count))
    }
}

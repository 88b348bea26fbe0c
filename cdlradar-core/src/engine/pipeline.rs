//! Analysis pipeline: the single entry point of the engine.
//!
//! One call turns an instrument's base candles into a
//! [`MultiTimeframeAnalysis`]: validate → resample → evaluate → fuse → score.
//! The pipeline holds no mutable state; identical requests give identical
//! results.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::components::factory::{build_ensemble, default_ensemble, FactoryError};
use crate::components::fusion::fuse;
use crate::components::scorer::score;
use crate::components::strategy::{StrategyEvaluator, StrategyKind};
use crate::data::TimeframeSeries;
use crate::domain::{Candle, MultiTimeframeAnalysis, SignalMap, Timeframe};

/// Errors that fail a single instrument's evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("{symbol}: malformed {timeframe} candle at {datetime}: {field} is not finite")]
    MalformedCandle {
        symbol: String,
        timeframe: Timeframe,
        datetime: NaiveDateTime,
        field: &'static str,
    },
}

/// Inputs of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub symbol: &'a str,
    /// Base (5-minute) candles, ascending.
    pub base: &'a [Candle],
    /// 30-second candles; only read in precision mode.
    pub precision: Option<&'a [Candle]>,
    pub precision_mode: bool,
    pub evaluated_at: DateTime<Utc>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn new(symbol: &'a str, base: &'a [Candle], evaluated_at: DateTime<Utc>) -> Self {
        Self {
            symbol,
            base,
            precision: None,
            precision_mode: false,
            evaluated_at,
        }
    }

    /// Enable precision mode with the given 30-second series.
    pub fn with_precision(mut self, candles: &'a [Candle]) -> Self {
        self.precision = Some(candles);
        self.precision_mode = true;
        self
    }
}

/// Evaluates instruments against a fixed strategy ensemble.
pub struct AnalysisPipeline {
    ensemble: Vec<Box<dyn StrategyEvaluator>>,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(default_ensemble())
    }
}

impl AnalysisPipeline {
    /// Pipeline over an already-built ensemble. An empty ensemble is allowed
    /// and fuses to neutral on every tier.
    pub fn new(ensemble: Vec<Box<dyn StrategyEvaluator>>) -> Self {
        Self { ensemble }
    }

    /// Pipeline over a configured list of strategy kinds.
    pub fn from_kinds(kinds: &[StrategyKind]) -> Result<Self, FactoryError> {
        Ok(Self::new(build_ensemble(kinds)?))
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.ensemble.iter().map(|s| s.name()).collect()
    }

    /// Evaluate one instrument.
    ///
    /// Empty or short input is not an error: the affected tiers vote neutral
    /// and the scorer exits early. Only non-finite prices fail the call.
    pub fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
    ) -> Result<MultiTimeframeAnalysis, PipelineError> {
        // Step 1: Reject non-finite prices
        validate(request.symbol, Timeframe::BASE, request.base)?;
        let precision = if request.precision_mode {
            let fine = request.precision.unwrap_or(&[]);
            validate(request.symbol, Timeframe::Sec30, fine)?;
            Some(fine.to_vec())
        } else {
            None
        };

        // Step 2: Build every evaluated tier
        let series = TimeframeSeries::from_base(request.base, precision);
        let timeframes = Timeframe::evaluated(request.precision_mode);

        // Step 3: Collect each strategy's votes
        let votes: Vec<SignalMap> = self.ensemble.iter().map(|s| s.evaluate(&series)).collect();

        // Step 4: Fuse and score
        let signals = fuse(&votes, &timeframes);
        let main_signal = signals.get(&Timeframe::BASE).copied().unwrap_or_default();
        let verdict = score(&series, main_signal, &signals, request.precision_mode);

        debug!(
            symbol = request.symbol,
            ?signals,
            score = verdict.score,
            setup = ?verdict.setup,
            action = %verdict.action,
            "analysis complete"
        );

        Ok(MultiTimeframeAnalysis {
            symbol: request.symbol.to_string(),
            price: request.base.last().map(|c| c.close).unwrap_or(0.0),
            signals,
            action: verdict.action,
            main_signal,
            last_updated: request.evaluated_at,
            power_score: verdict.score,
            precision_mode: request.precision_mode,
            breakdown: verdict.breakdown,
        })
    }
}

fn validate(symbol: &str, timeframe: Timeframe, candles: &[Candle]) -> Result<(), PipelineError> {
    for c in candles {
        if let Some(field) = c.first_non_finite_field() {
            return Err(PipelineError::MalformedCandle {
                symbol: symbol.to_string(),
                timeframe,
                datetime: c.datetime,
                field,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::strategy::NullStrategy;
    use crate::domain::{ActionType, SignalType};
    use crate::indicators::make_candles;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_709_300_000, 0).unwrap()
    }

    #[test]
    fn empty_input_is_neutral_no_action() {
        let pipeline = AnalysisPipeline::default();
        let analysis = pipeline.analyze(&AnalysisRequest::new("EUR/USD", &[], now())).unwrap();
        assert_eq!(analysis.price, 0.0);
        assert_eq!(analysis.signals.len(), 4);
        assert!(analysis.signals.values().all(SignalType::is_neutral));
        assert_eq!(analysis.action, ActionType::NoAction);
        assert_eq!(analysis.power_score, 0);
        assert_eq!(analysis.last_updated, now());
    }

    #[test]
    fn precision_mode_adds_fine_tier() {
        let base = make_candles(&[100.0; 50]);
        let fine = make_candles(&[100.0; 10]);
        let request = AnalysisRequest::new("BTC/USD", &base, now()).with_precision(&fine);
        let analysis = AnalysisPipeline::default().analyze(&request).unwrap();
        assert_eq!(analysis.signals.len(), 5);
        assert!(analysis.precision_mode);
        assert!(analysis.signals.contains_key(&Timeframe::Sec30));
    }

    #[test]
    fn precision_mode_without_fine_series_still_has_five_tiers() {
        let base = make_candles(&[100.0; 50]);
        let mut request = AnalysisRequest::new("BTC/USD", &base, now());
        request.precision_mode = true;
        let analysis = AnalysisPipeline::default().analyze(&request).unwrap();
        assert_eq!(analysis.signal(Timeframe::Sec30), SignalType::Neutral);
        assert_eq!(analysis.signals.len(), 5);
    }

    #[test]
    fn non_finite_price_is_malformed() {
        let mut base = make_candles(&[100.0, 101.0, 102.0]);
        base[1].close = f64::INFINITY;
        let err = AnalysisPipeline::default()
            .analyze(&AnalysisRequest::new("SPX", &base, now()))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedCandle { field: "close", timeframe: Timeframe::Min5, .. }
        ));
    }

    #[test]
    fn malformed_fine_series_only_matters_in_precision_mode() {
        let base = make_candles(&[100.0; 40]);
        let mut fine = make_candles(&[100.0; 5]);
        fine[0].open = f64::NAN;

        let mut request = AnalysisRequest::new("ETH/USD", &base, now());
        request.precision = Some(&fine);
        assert!(AnalysisPipeline::default().analyze(&request).is_ok());

        let request = request.with_precision(&fine);
        assert!(AnalysisPipeline::default().analyze(&request).is_err());
    }

    #[test]
    fn empty_ensemble_never_acts() {
        let closes: Vec<f64> = (0..300).map(|i| 100.0 + i as f64).collect();
        let base = make_candles(&closes);
        let pipeline = AnalysisPipeline::new(Vec::new());
        let analysis = pipeline.analyze(&AnalysisRequest::new("NVDA", &base, now())).unwrap();
        assert_eq!(analysis.main_signal, SignalType::Neutral);
        assert_eq!(analysis.action, ActionType::NoAction);
        assert_eq!(analysis.price, 399.0);
    }

    #[test]
    fn abstaining_ensemble_is_neutral() {
        let base = make_candles(&[100.0; 60]);
        let pipeline = AnalysisPipeline::new(vec![Box::new(NullStrategy), Box::new(NullStrategy)]);
        let analysis = pipeline.analyze(&AnalysisRequest::new("DAX", &base, now())).unwrap();
        assert!(analysis.signals.values().all(SignalType::is_neutral));
    }

    #[test]
    fn from_kinds_validates_ensemble() {
        assert!(AnalysisPipeline::from_kinds(&[]).is_err());
        let pipeline = AnalysisPipeline::from_kinds(&[StrategyKind::TrendRsi]).unwrap();
        assert_eq!(pipeline.strategy_names(), vec!["trend_rsi"]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let closes: Vec<f64> = (0..400).map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0).collect();
        let base = make_candles(&closes);
        let pipeline = AnalysisPipeline::default();
        let request = AnalysisRequest::new("GBP/USD", &base, now());
        assert_eq!(pipeline.analyze(&request).unwrap(), pipeline.analyze(&request).unwrap());
    }
}

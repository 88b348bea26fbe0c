//! Watchlist scanner: one refresh cycle over every instrument.
//!
//! Per instrument: reuse a cached analysis when possible, otherwise fetch
//! candles, run the pipeline, then apply session and calendar overrides.
//! Instruments are evaluated in parallel with no shared mutable state; the
//! cache and alert tracker are updated on the calling thread afterwards.
//!
//! Override precedence: `MarketClosed` > `NewsPending` > the core action.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use cdlradar_core::data::CandleSupplier;
use cdlradar_core::domain::{ActionType, Candle, Instrument, MultiTimeframeAnalysis, Timeframe};
use cdlradar_core::fingerprint::{fingerprint_input, InputFingerprint};
use cdlradar_core::{AnalysisPipeline, AnalysisRequest, PipelineError};

use crate::alerts::{Alert, AlertTracker};
use crate::cache::AnalysisCache;
use crate::config::{ConfigError, ScannerConfig, ScannerSection};
use crate::news::NewsCalendar;
use crate::session::is_market_open;

/// Errors that prevent a scanner from being built.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Why an instrument produced no analysis this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientData { have: usize, need: usize },
}

/// What happened to one instrument in a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Freshly computed this cycle.
    Analyzed { analysis: MultiTimeframeAnalysis },
    /// Reused from the cache.
    Cached { analysis: MultiTimeframeAnalysis },
    Skipped { skip: SkipReason },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub instrument: Instrument,
    pub outcome: Outcome,
}

impl ScanEntry {
    /// Analysis with overrides applied, if the instrument produced one.
    pub fn analysis(&self) -> Option<&MultiTimeframeAnalysis> {
        match &self.outcome {
            Outcome::Analyzed { analysis } | Outcome::Cached { analysis } => Some(analysis),
            Outcome::Skipped { .. } | Outcome::Failed { .. } => None,
        }
    }
}

/// Result of one refresh cycle, in watchlist order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub generation: u64,
    pub at: DateTime<Utc>,
    pub entries: Vec<ScanEntry>,
    pub alerts: Vec<Alert>,
}

impl ScanReport {
    /// This cycle's analysis for `symbol`, after overrides.
    pub fn analysis(&self, symbol: &str) -> Option<&MultiTimeframeAnalysis> {
        self.entries
            .iter()
            .find(|e| e.instrument.symbol == symbol)
            .and_then(ScanEntry::analysis)
    }

    pub fn analyses(&self) -> impl Iterator<Item = &MultiTimeframeAnalysis> {
        self.entries.iter().filter_map(ScanEntry::analysis)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn analyzed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Analyzed { .. }))
    }

    pub fn cached(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Cached { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }
}

/// Apply caller-side overrides to a core action.
pub fn override_action(core: ActionType, market_open: bool, news_pending: bool) -> ActionType {
    if !market_open {
        ActionType::MarketClosed
    } else if news_pending {
        ActionType::NewsPending
    } else {
        core
    }
}

/// Per-instrument result of the parallel section.
enum Evaluation {
    Fresh {
        analysis: MultiTimeframeAnalysis,
        fingerprint: InputFingerprint,
    },
    /// `fingerprint` is set when the hit came from unchanged input and the
    /// entry should be re-stamped with the current generation.
    Cached {
        analysis: MultiTimeframeAnalysis,
        fingerprint: Option<InputFingerprint>,
    },
    Skipped(SkipReason),
    Failed(PipelineError),
}

/// Scans a watchlist against one candle supplier.
pub struct Scanner {
    settings: ScannerSection,
    lookahead: chrono::Duration,
    instruments: Vec<Instrument>,
    pipeline: AnalysisPipeline,
    supplier: Box<dyn CandleSupplier>,
    calendar: NewsCalendar,
    cache: AnalysisCache,
    alerts: AlertTracker,
    pool: Option<rayon::ThreadPool>,
    config_id: String,
}

impl Scanner {
    pub fn new(config: &ScannerConfig, supplier: Box<dyn CandleSupplier>) -> Result<Self, ScanError> {
        config.validate()?;
        let pipeline = AnalysisPipeline::from_kinds(&config.ensemble()?).map_err(ConfigError::from)?;

        let pool = if config.scanner.threads > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.scanner.threads)
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            settings: config.scanner.clone(),
            lookahead: config.news_lookahead(),
            instruments: config.watchlist(),
            pipeline,
            supplier,
            calendar: NewsCalendar::new(),
            cache: AnalysisCache::new(),
            alerts: AlertTracker::new(),
            pool,
            config_id: config.config_id(),
        })
    }

    pub fn with_calendar(mut self, calendar: NewsCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Start from a previously saved cache.
    pub fn with_cache(mut self, cache: AnalysisCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Generation for the next refresh cycle: newer than anything in the
    /// cache, so a cache restored from disk is never served as current.
    pub fn next_generation(&self) -> u64 {
        self.cache.max_generation() + 1
    }

    pub fn supplier_name(&self) -> &str {
        self.supplier.name()
    }

    /// Run one refresh cycle.
    ///
    /// `generation` identifies the cycle: analyses already computed in the
    /// same generation are reused without fetching.
    pub fn scan(&mut self, generation: u64, now: DateTime<Utc>) -> ScanReport {
        info!(
            generation,
            instruments = self.instruments.len(),
            supplier = self.supplier.name(),
            config = %self.config_id,
            "scan started"
        );

        let evaluations: Vec<Evaluation> = match &self.pool {
            Some(pool) => pool.install(|| self.evaluate_all(generation, now)),
            None => self.evaluate_all(generation, now),
        };

        let mut entries = Vec::with_capacity(evaluations.len());
        let mut alerts = Vec::new();
        for (instrument, evaluation) in self.instruments.iter().zip(evaluations) {
            let core = match evaluation {
                Evaluation::Fresh {
                    analysis,
                    fingerprint,
                } => {
                    self.cache
                        .insert(&instrument.symbol, analysis.clone(), generation, fingerprint);
                    Ok((analysis, false))
                }
                Evaluation::Cached {
                    analysis,
                    fingerprint,
                } => {
                    if let Some(fingerprint) = fingerprint {
                        self.cache
                            .insert(&instrument.symbol, analysis.clone(), generation, fingerprint);
                    }
                    Ok((analysis, true))
                }
                Evaluation::Skipped(skip) => Err(Outcome::Skipped { skip }),
                Evaluation::Failed(e) => {
                    warn!(symbol = %instrument.symbol, error = %e, "analysis failed");
                    Err(Outcome::Failed {
                        error: e.to_string(),
                    })
                }
            };

            let outcome = match core {
                Ok((analysis, cached)) => {
                    let action = override_action(
                        analysis.action,
                        is_market_open(instrument.asset_class, now),
                        self.calendar
                            .is_news_pending(&instrument.symbol, now, self.lookahead),
                    );
                    let analysis = analysis.with_action(action);
                    if let Some(alert) = self.alerts.observe(&instrument.symbol, action, now) {
                        info!(symbol = %alert.symbol, kind = ?alert.kind, "alert");
                        alerts.push(alert);
                    }
                    info!(
                        symbol = %instrument.symbol,
                        action = %analysis.action,
                        score = analysis.power_score,
                        cached,
                        "instrument evaluated"
                    );
                    if cached {
                        Outcome::Cached { analysis }
                    } else {
                        Outcome::Analyzed { analysis }
                    }
                }
                Err(outcome) => outcome,
            };

            entries.push(ScanEntry {
                instrument: instrument.clone(),
                outcome,
            });
        }

        let report = ScanReport {
            generation,
            at: now,
            entries,
            alerts,
        };
        info!(
            generation,
            analyzed = report.analyzed(),
            cached = report.cached(),
            skipped = report.skipped(),
            failed = report.failed(),
            "scan finished"
        );
        report
    }

    fn evaluate_all(&self, generation: u64, now: DateTime<Utc>) -> Vec<Evaluation> {
        self.instruments
            .par_iter()
            .map(|instrument| self.evaluate(instrument, generation, now))
            .collect()
    }

    fn evaluate(&self, instrument: &Instrument, generation: u64, now: DateTime<Utc>) -> Evaluation {
        let symbol = instrument.symbol.as_str();

        // Step 1: Reuse this cycle's result without fetching
        if let Some(entry) = self.cache.entry(symbol).filter(|e| e.generation == generation) {
            return Evaluation::Cached {
                analysis: entry.analysis.clone(),
                fingerprint: None,
            };
        }

        // Step 2: Fetch candles
        let base = self
            .supplier
            .fetch_candles(symbol, Timeframe::BASE, self.settings.base_count);
        if base.len() < self.settings.min_base_candles {
            debug!(symbol, have = base.len(), "not enough base candles");
            return Evaluation::Skipped(SkipReason::InsufficientData {
                have: base.len(),
                need: self.settings.min_base_candles,
            });
        }
        let precision: Option<Vec<Candle>> = self.settings.precision_mode.then(|| {
            self.supplier
                .fetch_candles(symbol, Timeframe::Sec30, self.settings.precision_count)
        });

        // Step 3: Reuse when the input is unchanged
        let fingerprint = fingerprint_input(&base, precision.as_deref());
        if let Some(analysis) = self.cache.lookup(symbol, generation, &fingerprint) {
            return Evaluation::Cached {
                analysis: analysis.clone(),
                fingerprint: Some(fingerprint),
            };
        }

        // Step 4: Analyze
        let mut request = AnalysisRequest::new(symbol, &base, now);
        if let Some(fine) = precision.as_deref() {
            request = request.with_precision(fine);
        }
        match self.pipeline.analyze(&request) {
            Ok(analysis) => Evaluation::Fresh {
                analysis,
                fingerprint,
            },
            Err(e) => Evaluation::Failed(e),
        }
    }
}

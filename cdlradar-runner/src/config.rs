//! Scanner configuration, loaded from TOML.
//!
//! ```toml
//! [scanner]
//! refresh_interval_secs = 300
//! base_count = 5000
//! min_base_candles = 100
//! precision_mode = false
//! news_lookahead_mins = 30
//!
//! [strategies]
//! ensemble = ["swing_structure", "squeeze_momentum", "macd"]
//!
//! [[instruments]]
//! symbol = "EUR/USD"
//! asset_class = "forex"
//! ```
//!
//! Every field has a default. An empty instrument list means the default
//! universe.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cdlradar_core::components::factory::FactoryError;
use cdlradar_core::components::StrategyKind;
use cdlradar_core::domain::{Instrument, InstrumentError};

use crate::universe::default_universe;

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Strategy(#[from] FactoryError),

    #[error("refresh_interval_secs must be > 0")]
    ZeroRefreshInterval,

    #[error("duplicate instrument '{0}'")]
    DuplicateInstrument(String),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}

/// Top-level scanner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub scanner: ScannerSection,
    pub strategies: StrategiesSection,
    pub instruments: Vec<Instrument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSection {
    pub refresh_interval_secs: u64,
    /// Base candles requested per instrument.
    pub base_count: usize,
    /// Fewer base candles than this skips the instrument.
    pub min_base_candles: usize,
    pub precision_mode: bool,
    /// 30-second candles requested in precision mode.
    pub precision_count: usize,
    pub news_lookahead_mins: i64,
    /// Worker threads; 0 uses rayon's default.
    pub threads: usize,
}

impl Default for ScannerSection {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 300,
            base_count: 5000,
            min_base_candles: 100,
            precision_mode: false,
            precision_count: 600,
            news_lookahead_mins: 30,
            threads: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategiesSection {
    /// Strategy names as written in the file, validated by [`ScannerConfig::validate`].
    pub ensemble: Vec<String>,
}

impl Default for StrategiesSection {
    fn default() -> Self {
        Self {
            ensemble: StrategyKind::DEFAULT_ENSEMBLE
                .iter()
                .map(|k| k.as_str().to_string())
                .collect(),
        }
    }
}

impl ScannerConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        self.ensemble()?;

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if instrument.symbol.trim().is_empty() {
                return Err(InstrumentError::EmptySymbol.into());
            }
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(ConfigError::DuplicateInstrument(instrument.symbol.clone()));
            }
        }
        Ok(())
    }

    /// Configured strategy kinds, rejecting unknown names, duplicates and an
    /// empty list.
    pub fn ensemble(&self) -> Result<Vec<StrategyKind>, ConfigError> {
        let kinds = self
            .strategies
            .ensemble
            .iter()
            .map(|name| name.parse::<StrategyKind>())
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.is_empty() {
            return Err(FactoryError::EmptyEnsemble.into());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = kinds.iter().find(|k| !seen.insert(**k)) {
            return Err(FactoryError::DuplicateStrategy(*dup).into());
        }
        Ok(kinds)
    }

    /// Watched instruments: the configured list, or the default universe
    /// when none are configured.
    pub fn watchlist(&self) -> Vec<Instrument> {
        if self.instruments.is_empty() {
            default_universe()
        } else {
            self.instruments.clone()
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.scanner.refresh_interval_secs)
    }

    pub fn news_lookahead(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.scanner.news_lookahead_mins)
    }

    /// Deterministic identity of this configuration, logged with each scan.
    pub fn config_id(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().as_str()[..16].to_string()
    }
}

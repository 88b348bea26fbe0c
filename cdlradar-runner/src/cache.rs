//! Per-instrument analysis cache with fingerprint-based reuse.
//!
//! The scanner owns one cache. An entry is reused when it was computed in
//! the current refresh generation, or when the supplier handed back the
//! exact same candles (same input fingerprint). The cache can be persisted
//! as JSON so a restarted scanner keeps its last results.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cdlradar_core::domain::MultiTimeframeAnalysis;
use cdlradar_core::fingerprint::InputFingerprint;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One cached analysis with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Core result, before session/news overrides.
    pub analysis: MultiTimeframeAnalysis,
    pub generation: u64,
    pub fingerprint: InputFingerprint,
}

/// Symbol → last analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisCache {
    entries: HashMap<String, CacheEntry>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last analysis for `symbol`, regardless of freshness.
    pub fn get(&self, symbol: &str) -> Option<&MultiTimeframeAnalysis> {
        self.entries.get(symbol).map(|e| &e.analysis)
    }

    pub fn entry(&self, symbol: &str) -> Option<&CacheEntry> {
        self.entries.get(symbol)
    }

    /// Cached analysis for `symbol` when it can be reused: computed in
    /// `generation`, or computed from identical input.
    pub fn lookup(
        &self,
        symbol: &str,
        generation: u64,
        fingerprint: &InputFingerprint,
    ) -> Option<&MultiTimeframeAnalysis> {
        self.entries
            .get(symbol)
            .filter(|e| e.generation == generation || &e.fingerprint == fingerprint)
            .map(|e| &e.analysis)
    }

    /// Store (or replace) the entry for `symbol`.
    pub fn insert(
        &mut self,
        symbol: impl Into<String>,
        analysis: MultiTimeframeAnalysis,
        generation: u64,
        fingerprint: InputFingerprint,
    ) {
        self.entries.insert(
            symbol.into(),
            CacheEntry {
                analysis,
                generation,
                fingerprint,
            },
        );
    }

    /// Highest generation stamped on any entry, 0 when empty.
    pub fn max_generation(&self) -> u64 {
        self.entries.values().map(|e| e.generation).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load a cache written by [`save`](Self::save). A missing file is an
    /// empty cache.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the cache as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdlradar_core::domain::{ActionType, ScoreBreakdown, SignalMap, SignalType};
    use chrono::{DateTime, Utc};

    fn analysis(symbol: &str, price: f64) -> MultiTimeframeAnalysis {
        MultiTimeframeAnalysis {
            symbol: symbol.to_string(),
            price,
            signals: SignalMap::new(),
            action: ActionType::Wait,
            main_signal: SignalType::Buy,
            last_updated: DateTime::<Utc>::from_timestamp(1_709_300_000, 0).unwrap(),
            power_score: 45,
            precision_mode: false,
            breakdown: ScoreBreakdown::default(),
        }
    }

    fn fp(s: &str) -> InputFingerprint {
        InputFingerprint(s.to_string())
    }

    #[test]
    fn lookup_hits_on_same_generation() {
        let mut cache = AnalysisCache::new();
        cache.insert("SPX", analysis("SPX", 1.0), 3, fp("aaa"));
        assert!(cache.lookup("SPX", 3, &fp("bbb")).is_some());
        assert!(cache.lookup("SPX", 4, &fp("bbb")).is_none());
        assert!(cache.lookup("DAX", 3, &fp("aaa")).is_none());
    }

    #[test]
    fn lookup_hits_on_unchanged_input() {
        let mut cache = AnalysisCache::new();
        cache.insert("SPX", analysis("SPX", 1.0), 3, fp("aaa"));
        assert_eq!(cache.lookup("SPX", 9, &fp("aaa")).map(|a| a.price), Some(1.0));
    }

    #[test]
    fn insert_replaces_and_clear_empties() {
        let mut cache = AnalysisCache::new();
        cache.insert("SPX", analysis("SPX", 1.0), 1, fp("a"));
        cache.insert("SPX", analysis("SPX", 2.0), 2, fp("b"));
        cache.insert("DAX", analysis("DAX", 3.0), 2, fp("c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("SPX").map(|a| a.price), Some(2.0));
        assert_eq!(cache.entry("SPX").map(|e| e.generation), Some(2));

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("SPX").is_none());
    }

    #[test]
    fn save_and_load_through_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state").join("cache.json");

        let mut cache = AnalysisCache::new();
        cache.insert("EUR/USD", analysis("EUR/USD", 1.25), 7, fp("f00d"));
        cache.save(&path).unwrap();

        let loaded = AnalysisCache::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entry("EUR/USD"), cache.entry("EUR/USD"));
    }

    #[test]
    fn max_generation_tracks_newest_entry() {
        let mut cache = AnalysisCache::new();
        assert_eq!(cache.max_generation(), 0);
        cache.insert("SPX", analysis("SPX", 1.0), 4, fp("a"));
        cache.insert("DAX", analysis("DAX", 1.0), 2, fp("b"));
        assert_eq!(cache.max_generation(), 4);
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loaded = AnalysisCache::load(&temp_dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }
}

//! CDLRadar Runner: scanner orchestration around the analysis engine.
//!
//! This crate builds on `cdlradar-core` to provide:
//! - TOML scanner configuration and the default instrument universe
//! - Parallel watchlist scans with per-instrument failure isolation
//! - Session-hour and economic-calendar action overrides
//! - Analysis cache keyed by refresh generation and input fingerprint
//! - Entry/exit alert transitions
//! - Watchlist filtering and sorting

pub mod alerts;
pub mod cache;
pub mod config;
pub mod news;
pub mod scanner;
pub mod session;
pub mod universe;
pub mod watchlist;

pub use alerts::{Alert, AlertKind, AlertTracker};
pub use cache::{AnalysisCache, CacheEntry, CacheError};
pub use config::{ConfigError, ScannerConfig};
pub use news::{CalendarError, EconomicEvent, Impact, NewsCalendar};
pub use scanner::{override_action, Outcome, ScanEntry, ScanError, ScanReport, Scanner, SkipReason};
pub use session::is_market_open;
pub use universe::default_universe;
pub use watchlist::{SortDirection, SortKey, WatchRow, WatchlistView};

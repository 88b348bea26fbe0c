//! Economic calendar and the `NEWS_PENDING` override.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// One scheduled release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub event: String,
    pub date: DateTime<Utc>,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("failed to read calendar: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse calendar: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Upcoming events keyed by instrument symbol.
///
/// JSON form: `{ "EUR/USD": [ { "event": ..., "date": ..., "impact": "High" } ] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsCalendar {
    events: HashMap<String, Vec<EconomicEvent>>,
}

impl NewsCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CalendarError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, CalendarError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn add(&mut self, symbol: impl Into<String>, event: EconomicEvent) {
        self.events.entry(symbol.into()).or_default().push(event);
    }

    /// A high-impact event for `symbol` falls within `lookahead` of `now`.
    pub fn is_news_pending(&self, symbol: &str, now: DateTime<Utc>, lookahead: Duration) -> bool {
        self.events.get(symbol).is_some_and(|events| {
            events
                .iter()
                .any(|e| e.impact == Impact::High && e.date >= now && e.date - now <= lookahead)
        })
    }
}

//! Candle supplier trait, wire rows and structured error types.
//!
//! Suppliers abstract over where candles come from (a REST row store, a
//! time-series proxy, CSV files, a synthetic generator) so the scanner can
//! swap them and tests can mock them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::{Candle, Timeframe};

/// Structured error types for candle retrieval and parsing.
#[derive(Debug, Error)]
pub enum CandleError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("rate limited by supplier (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("supplier reported an error: {0}")]
    Upstream(String),

    #[error("invalid {field} '{value}' at {datetime}")]
    InvalidPrice {
        field: &'static str,
        value: String,
        datetime: String,
    },

    #[error("invalid datetime '{0}'")]
    InvalidDatetime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Trait for candle suppliers.
pub trait CandleSupplier: Send + Sync {
    /// Human-readable name of this supplier.
    fn name(&self) -> &str;

    /// Fetch the last `count` candles of `symbol` at `interval`, ascending.
    fn try_fetch(
        &self,
        symbol: &str,
        interval: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, CandleError>;

    /// Like [`try_fetch`](Self::try_fetch), but failures are logged and
    /// answered with an empty series.
    fn fetch_candles(&self, symbol: &str, interval: Timeframe, count: usize) -> Vec<Candle> {
        match self.try_fetch(symbol, interval, count) {
            Ok(candles) => candles,
            Err(e) => {
                warn!(supplier = self.name(), symbol, %interval, error = %e, "candle fetch failed");
                Vec::new()
            }
        }
    }
}

/// A price or volume field as suppliers send it: JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Number(f64),
    Text(String),
}

impl WireNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            WireNumber::Number(v) => Some(*v),
            WireNumber::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    fn raw(&self) -> String {
        match self {
            WireNumber::Number(v) => v.to_string(),
            WireNumber::Text(s) => s.clone(),
        }
    }
}

/// One candle row as it arrives over the wire, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    pub datetime: String,
    pub open: WireNumber,
    pub high: WireNumber,
    pub low: WireNumber,
    pub close: WireNumber,
    #[serde(default)]
    pub volume: Option<WireNumber>,
}

impl RawCandle {
    /// Convert to a [`Candle`].
    ///
    /// Prices must parse to finite numbers. Volume is lenient: missing,
    /// unparsable or negative volume becomes 0 and fractional volume is
    /// truncated.
    pub fn parse(&self) -> Result<Candle, CandleError> {
        let datetime = parse_datetime(&self.datetime)?;
        let price = |field: &'static str, value: &WireNumber| {
            value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CandleError::InvalidPrice {
                    field,
                    value: value.raw(),
                    datetime: self.datetime.clone(),
                })
        };
        let volume = self
            .volume
            .as_ref()
            .and_then(WireNumber::as_f64)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.trunc() as u64)
            .unwrap_or(0);

        Ok(Candle {
            datetime,
            open: price("open", &self.open)?,
            high: price("high", &self.high)?,
            low: price("low", &self.low)?,
            close: price("close", &self.close)?,
            volume,
        })
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a supplier timestamp. Date-only values are taken as midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, CandleError> {
    let s = s.trim();
    let s = s.strip_suffix('Z').unwrap_or(s);
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CandleError::InvalidDatetime(s.to_string()))
}

/// Parse a supplier payload into ascending candles.
///
/// Accepted shapes: a bare array of rows, an object carrying the rows under
/// `values`, or a single row object. `null` is an empty series.
pub fn parse_payload(payload: serde_json::Value) -> Result<Vec<Candle>, CandleError> {
    let rows = match payload {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(mut obj) => match obj.remove("values") {
            Some(serde_json::Value::Array(rows)) => rows,
            Some(serde_json::Value::Null) => Vec::new(),
            Some(other) => vec![other],
            None => vec![serde_json::Value::Object(obj)],
        },
        other => {
            return Err(CandleError::ResponseFormatChanged(format!(
                "expected candle rows, got {other}"
            )))
        }
    };

    let mut candles = rows
        .into_iter()
        .map(|row| {
            serde_json::from_value::<RawCandle>(row)
                .map_err(|e| CandleError::ResponseFormatChanged(e.to_string()))
                .and_then(|raw| raw.parse())
        })
        .collect::<Result<Vec<_>, _>>()?;
    candles.sort_by_key(|c| c.datetime);
    Ok(candles)
}

/// Keep only the last `count` candles.
pub fn keep_last(mut candles: Vec<Candle>, count: usize) -> Vec<Candle> {
    if candles.len() > count {
        candles.drain(..candles.len() - count);
    }
    candles
}

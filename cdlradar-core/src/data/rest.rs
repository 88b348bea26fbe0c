//! REST candle suppliers over `reqwest::blocking`.
//!
//! - [`MarketCacheSupplier`] reads the cached `time_series_data` column of a
//!   `market_cache` row from a PostgREST-style row store.
//! - [`TimeSeriesSupplier`] queries a time-series proxy that answers
//!   `{status, message, values}`.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Candle, Timeframe};

use super::provider::{keep_last, parse_payload, CandleError, CandleSupplier};

const USER_AGENT: &str = concat!("cdlradar/", env!("CARGO_PKG_VERSION"));

/// Retry policy shared by the REST suppliers.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

fn build_client() -> Result<Client, CandleError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CandleError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))
}

/// Send a request with exponential backoff on rate limits, 5xx and
/// connection failures, and decode the JSON body.
fn get_json_with_retry(
    request: impl Fn() -> RequestBuilder,
    symbol: &str,
    retry: RetryPolicy,
) -> Result<serde_json::Value, CandleError> {
    let mut last_error = None;

    for attempt in 0..=retry.max_retries {
        if attempt > 0 {
            let delay = retry.base_delay * 2u32.pow(attempt - 1);
            debug!(symbol, attempt, ?delay, "retrying candle request");
            std::thread::sleep(delay);
        }

        match request().send() {
            Ok(resp) => {
                let status = resp.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = resp
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(60);
                    last_error = Some(CandleError::RateLimited {
                        retry_after_secs: retry_after,
                    });
                    continue;
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(CandleError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    });
                }

                if status.is_server_error() {
                    last_error = Some(CandleError::Http {
                        status: status.as_u16(),
                        symbol: symbol.to_string(),
                    });
                    continue;
                }

                if !status.is_success() {
                    return Err(CandleError::Http {
                        status: status.as_u16(),
                        symbol: symbol.to_string(),
                    });
                }

                return resp.json::<serde_json::Value>().map_err(|e| {
                    CandleError::ResponseFormatChanged(format!(
                        "failed to parse response for {symbol}: {e}"
                    ))
                });
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    last_error = Some(CandleError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                return Err(CandleError::NetworkUnreachable(e.to_string()));
            }
        }
    }

    Err(last_error.unwrap_or_else(|| CandleError::NetworkUnreachable("max retries exceeded".into())))
}

// ─── Market cache row store ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MarketCacheRow {
    #[serde(default)]
    time_series_data: serde_json::Value,
}

/// Reads pre-fetched base candles from the `market_cache` table.
///
/// The row store only holds the base tier. Any other interval yields no
/// candles, so the precision tier is never filled with base data.
pub struct MarketCacheSupplier {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl MarketCacheSupplier {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, CandleError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/market_cache", self.base_url)
    }

    /// Extract candles from the row-store response body.
    fn parse_rows(symbol: &str, body: serde_json::Value) -> Result<Vec<Candle>, CandleError> {
        let rows: Vec<MarketCacheRow> = serde_json::from_value(body)
            .map_err(|e| CandleError::ResponseFormatChanged(e.to_string()))?;
        let row = rows.into_iter().next().ok_or_else(|| CandleError::SymbolNotFound {
            symbol: symbol.to_string(),
        })?;
        parse_payload(row.time_series_data)
    }
}

impl CandleSupplier for MarketCacheSupplier {
    fn name(&self) -> &str {
        "market_cache"
    }

    fn try_fetch(
        &self,
        symbol: &str,
        interval: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, CandleError> {
        if interval != Timeframe::BASE {
            debug!(symbol, %interval, "market cache holds only the base tier");
            return Ok(Vec::new());
        }
        let url = self.table_url();
        let body = get_json_with_retry(
            || {
                self.client
                    .get(&url)
                    .query(&[
                        ("symbol", format!("eq.{symbol}")),
                        ("select", "time_series_data".to_string()),
                    ])
                    .header("apikey", &self.api_key)
                    .bearer_auth(&self.api_key)
                    .header("Accept", "application/json")
            },
            symbol,
            self.retry,
        )?;
        let candles = Self::parse_rows(symbol, body)?;
        Ok(keep_last(candles, count))
    }
}

// ─── Time-series proxy ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    values: serde_json::Value,
}

/// Queries a time-series proxy by symbol, interval and output size.
pub struct TimeSeriesSupplier {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl TimeSeriesSupplier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CandleError> {
        Ok(Self {
            client: build_client()?,
            endpoint: endpoint.into(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn parse_response(body: serde_json::Value) -> Result<Vec<Candle>, CandleError> {
        let resp: TimeSeriesResponse = serde_json::from_value(body)
            .map_err(|e| CandleError::ResponseFormatChanged(e.to_string()))?;
        if resp.status.as_deref() == Some("error") {
            return Err(CandleError::Upstream(
                resp.message.unwrap_or_else(|| "unspecified error".into()),
            ));
        }
        parse_payload(resp.values)
    }
}

impl CandleSupplier for TimeSeriesSupplier {
    fn name(&self) -> &str {
        "time_series"
    }

    fn try_fetch(
        &self,
        symbol: &str,
        interval: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, CandleError> {
        let body = get_json_with_retry(
            || {
                self.client.get(&self.endpoint).query(&[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.label().to_string()),
                    ("outputsize", count.to_string()),
                ])
            },
            symbol,
            self.retry,
        )?;
        let candles = Self::parse_response(body)?;
        Ok(keep_last(candles, count))
    }
}

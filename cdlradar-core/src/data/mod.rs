//! Candle acquisition and timeframe construction

pub mod csv_supplier;
pub mod provider;
pub mod resample;
pub mod rest;
pub mod series;
pub mod synthetic;

pub use csv_supplier::CsvSupplier;
pub use provider::{parse_payload, CandleError, CandleSupplier, RawCandle, WireNumber};
pub use resample::resample;
pub use rest::{MarketCacheSupplier, RetryPolicy, TimeSeriesSupplier};
pub use series::TimeframeSeries;
pub use synthetic::SyntheticSupplier;

//! Integration tests for candle suppliers feeding the pipeline.
//!
//! Uses tempfile to exercise the CSV supplier against real files.

use chrono::{DateTime, Utc};
use cdlradar_core::data::{CandleError, CandleSupplier, CsvSupplier, SyntheticSupplier, TimeframeSeries};
use cdlradar_core::domain::Timeframe;
use cdlradar_core::fingerprint::fingerprint_input;
use cdlradar_core::{AnalysisPipeline, AnalysisRequest};

fn evaluated_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_709_300_000, 0).unwrap()
}

#[test]
fn csv_files_reproduce_synthetic_candles() {
    let dir = tempfile::tempdir().unwrap();
    let synthetic = SyntheticSupplier::new(7);
    let candles = synthetic.generate("EUR/USD", Timeframe::Min5, 300);

    let csv = CsvSupplier::new(dir.path());
    let path = csv.write("EUR/USD", Timeframe::Min5, &candles).unwrap();
    assert!(path.ends_with("EUR_USD.csv"));

    let loaded = csv.try_fetch("EUR/USD", Timeframe::Min5, 300).unwrap();
    assert_eq!(loaded, candles);
    assert_eq!(
        fingerprint_input(&loaded, None),
        fingerprint_input(&candles, None)
    );
}

#[test]
fn csv_fetch_keeps_the_most_recent_candles() {
    let dir = tempfile::tempdir().unwrap();
    let candles = SyntheticSupplier::new(7).generate("NVDA", Timeframe::Min5, 120);
    let csv = CsvSupplier::new(dir.path());
    csv.write("NVDA", Timeframe::Min5, &candles).unwrap();

    let recent = csv.fetch_candles("NVDA", Timeframe::Min5, 50);
    assert_eq!(recent.len(), 50);
    assert_eq!(recent.as_slice(), &candles[70..]);
}

#[test]
fn missing_file_is_symbol_not_found_and_fetch_swallows_it() {
    let dir = tempfile::tempdir().unwrap();
    let csv = CsvSupplier::new(dir.path());
    assert!(matches!(
        csv.try_fetch("DAX", Timeframe::Min5, 10),
        Err(CandleError::SymbolNotFound { .. })
    ));
    assert!(csv.fetch_candles("DAX", Timeframe::Min5, 10).is_empty());
}

#[test]
fn precision_tier_is_read_from_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let synthetic = SyntheticSupplier::new(11);
    let base = synthetic.generate("BTC/USD", Timeframe::Min5, 200);
    let fine = synthetic.generate("BTC/USD", Timeframe::Sec30, 120);

    let csv = CsvSupplier::new(dir.path());
    csv.write("BTC/USD", Timeframe::Min5, &base).unwrap();
    csv.write("BTC/USD", Timeframe::Sec30, &fine).unwrap();

    let base = csv.fetch_candles("BTC/USD", Timeframe::Min5, 200);
    let fine = csv.fetch_candles("BTC/USD", Timeframe::Sec30, 120);
    assert_eq!(fine.len(), 120);

    let series = TimeframeSeries::from_base(&base, Some(fine.clone()));
    assert!(series.has_precision());
    assert_eq!(series.get(Timeframe::Hour1).map(<[_]>::len), Some(17));

    let request = AnalysisRequest::new("BTC/USD", &base, evaluated_at()).with_precision(&fine);
    let analysis = AnalysisPipeline::default().analyze(&request).unwrap();
    assert!(analysis.precision_mode);
    assert_eq!(analysis.signals.len(), 5);
    assert!(analysis.power_score <= 100);
}

#[test]
fn synthetic_series_is_reproducible_per_symbol() {
    let supplier = SyntheticSupplier::new(42);
    let a = supplier.generate("AAPL", Timeframe::Min5, 64);
    let b = supplier.generate("AAPL", Timeframe::Min5, 64);
    let other = supplier.generate("MSFT", Timeframe::Min5, 64);
    assert_eq!(a, b);
    assert_ne!(a, other);
    assert!(a.iter().all(|c| c.is_sane()));
}

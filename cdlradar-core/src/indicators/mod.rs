//! Pure numeric indicators over price slices.
//!
//! Every function reads only the trailing window it needs and returns a single
//! value for the end of the slice. Short input is answered with a documented
//! fallback, never an error. A zero `period` is a caller bug and panics.

pub mod atr;
pub mod ema;
pub mod extremes;
pub mod fractal;
pub mod linreg;
pub mod rsi;
pub mod slope;
pub mod sma;
pub mod stdev;

pub use atr::{atr, true_range, true_ranges};
pub use ema::{ema, ema_series};
pub use extremes::{highest, lowest};
pub use fractal::{fractal_high, fractal_low};
pub use linreg::linreg;
pub use rsi::rsi;
pub use slope::slope;
pub use sma::sma;
pub use stdev::stdev;

/// Create synthetic 5-minute candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                datetime: start + chrono::Duration::minutes(5 * i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

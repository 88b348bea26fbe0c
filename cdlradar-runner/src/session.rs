//! Trading-session hours per asset class, in UTC.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use cdlradar_core::domain::AssetClass;

/// Forex opens Sunday and closes Friday at this UTC hour.
const FOREX_ROLLOVER_HOUR: u32 = 22;

/// Cash session for indices and stocks: 14:30–21:00 UTC, both ends inclusive.
const CASH_OPEN_MINUTE: u32 = 14 * 60 + 30;
const CASH_CLOSE_MINUTE: u32 = 21 * 60;

/// Whether `asset_class` is trading at `now`.
///
/// Holidays are not modelled.
pub fn is_market_open(asset_class: AssetClass, now: DateTime<Utc>) -> bool {
    let weekday = now.weekday();
    let is_weekday = !matches!(weekday, Weekday::Sat | Weekday::Sun);

    match asset_class {
        AssetClass::Crypto => true,
        AssetClass::Forex => match weekday {
            Weekday::Sat => false,
            Weekday::Sun => now.hour() >= FOREX_ROLLOVER_HOUR,
            Weekday::Fri => now.hour() < FOREX_ROLLOVER_HOUR,
            _ => true,
        },
        AssetClass::Indices | AssetClass::Stocks => {
            let minute = now.hour() * 60 + now.minute();
            is_weekday && (CASH_OPEN_MINUTE..=CASH_CLOSE_MINUTE).contains(&minute)
        }
        AssetClass::Commodities => is_weekday,
    }
}

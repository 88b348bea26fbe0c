//! Default instrument universe.

use cdlradar_core::domain::{AssetClass, Instrument};

const FOREX: &[&str] = &[
    "EUR/USD", "USD/JPY", "GBP/USD", "AUD/USD", "USD/CAD", "USD/CHF", "NZD/USD", "EUR/GBP",
    "USD/CNH", "EUR/JPY", "GBP/JPY", "AUD/JPY", "EUR/CHF", "USD/MXN",
];

const INDICES: &[&str] = &[
    "SPX", "IXIC", "DJI", "NDX", "N225", "HSI", "KS11", "FTSE", "BVSP", "DAX", "CAC", "STOXX50E",
    "SSEC", "AXJO", "RUT",
];

const STOCKS: &[&str] = &[
    "NVDA", "MSFT", "GOOGL", "AMZN", "TSM", "META", "AVGO", "LRCX", "KLAC", "NFLX", "V", "MU",
    "AAPL", "TSLA", "ORCL", "ASML", "AMD", "LLY",
];

const COMMODITIES: &[&str] = &["XAG/USD", "XAU/USD", "WTI", "CC", "KC"];

const CRYPTO: &[&str] = &[
    "BTC/USD", "ETH/USD", "SOL/USD", "BNB/USD", "XRP/USD", "ADA/USD", "DOT/USD", "LINK/USD",
];

/// Symbols of one asset class in the default universe.
pub fn symbols_for(class: AssetClass) -> &'static [&'static str] {
    match class {
        AssetClass::Forex => FOREX,
        AssetClass::Indices => INDICES,
        AssetClass::Stocks => STOCKS,
        AssetClass::Commodities => COMMODITIES,
        AssetClass::Crypto => CRYPTO,
    }
}

/// The full default watchlist, grouped by asset class in display order.
pub fn default_universe() -> Vec<Instrument> {
    AssetClass::ALL
        .into_iter()
        .flat_map(|class| {
            symbols_for(class).iter().map(move |symbol| Instrument {
                symbol: symbol.to_string(),
                asset_class: class,
            })
        })
        .collect()
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Market segment of an instrument. Drives session hours and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Forex,
    Indices,
    Stocks,
    Commodities,
    Crypto,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Forex,
        AssetClass::Indices,
        AssetClass::Stocks,
        AssetClass::Commodities,
        AssetClass::Crypto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Forex => "forex",
            AssetClass::Indices => "indices",
            AssetClass::Stocks => "stocks",
            AssetClass::Commodities => "commodities",
            AssetClass::Crypto => "crypto",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InstrumentError {
    #[error("unknown asset class '{0}' (expected forex, indices, stocks, commodities or crypto)")]
    UnknownAssetClass(String),

    #[error("instrument symbol must not be empty")]
    EmptySymbol,
}

impl FromStr for AssetClass {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetClass::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InstrumentError::UnknownAssetClass(s.to_string()))
    }
}

/// A watched instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub asset_class: AssetClass,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, asset_class: AssetClass) -> Result<Self, InstrumentError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(InstrumentError::EmptySymbol);
        }
        Ok(Self {
            symbol,
            asset_class,
        })
    }
}

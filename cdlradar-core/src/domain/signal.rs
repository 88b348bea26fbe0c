use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Timeframe;

/// Directional vote of one evaluator on one timeframe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Buy,
    Sale,
    /// Abstain. Also the answer for insufficient history.
    #[default]
    Neutral,
}

impl SignalType {
    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Map a numeric sign onto a vote: positive → Buy, negative → Sale.
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Self::Buy
        } else if value < 0.0 {
            Self::Sale
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Buy => "BUY",
            Self::Sale => "SALE",
            Self::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}

/// Recommended trade action for one instrument.
///
/// The core only ever produces `EnterNow`, `Wait` and `NoAction`. The other
/// variants are caller-side overrides (session hours, calendar) or position
/// management.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    EnterNow,
    Wait,
    Exit,
    #[default]
    NoAction,
    NewsPending,
    MarketClosed,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EnterNow => "Enter now",
            Self::Wait => "Wait",
            Self::Exit => "Exit",
            Self::NoAction => "No action",
            Self::NewsPending => "News pending",
            Self::MarketClosed => "Market closed",
        };
        f.write_str(s)
    }
}

/// One vote per timeframe, iterated finest tier first.
pub type SignalMap = BTreeMap<Timeframe, SignalType>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_is_default() {
        assert_eq!(SignalType::default(), SignalType::Neutral);
        assert_eq!(ActionType::default(), ActionType::NoAction);
    }

    #[test]
    fn from_sign_maps_zero_to_neutral() {
        assert_eq!(SignalType::from_sign(0.4), SignalType::Buy);
        assert_eq!(SignalType::from_sign(-1e-9), SignalType::Sale);
        assert_eq!(SignalType::from_sign(0.0), SignalType::Neutral);
        assert_eq!(SignalType::from_sign(f64::NAN), SignalType::Neutral);
    }

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&SignalType::Sale).unwrap(), "\"SALE\"");
        assert_eq!(
            serde_json::to_string(&ActionType::EnterNow).unwrap(),
            "\"ENTER_NOW\""
        );
        let back: ActionType = serde_json::from_str("\"MARKET_CLOSED\"").unwrap();
        assert_eq!(back, ActionType::MarketClosed);
    }
}

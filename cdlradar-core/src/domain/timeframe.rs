//! Timeframe tiers evaluated for every instrument.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle interval of one evaluated tier.
///
/// `Min5` is the base tier fetched from the data supplier. `Min15`, `Hour1`
/// and `Hour4` are derived from it by fixed-factor resampling. `Sec30` is the
/// optional precision tier; it is supplied as its own series and never
/// derived.
///
/// Ordering follows interval length, so a `BTreeMap<Timeframe, _>` iterates
/// from the finest to the coarsest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "30s")]
    Sec30,
    #[serde(rename = "5min")]
    Min5,
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
}

impl Timeframe {
    /// The tier fetched from the supplier.
    pub const BASE: Timeframe = Timeframe::Min5;

    /// Tiers derived from the base by resampling.
    pub const DERIVED: [Timeframe; 3] = [Timeframe::Min15, Timeframe::Hour1, Timeframe::Hour4];

    /// Grouping factor relative to the base tier, or `None` for tiers that
    /// are not built by resampling (the base itself and the precision tier).
    pub fn resample_factor(&self) -> Option<usize> {
        match self {
            Timeframe::Min15 => Some(3),
            Timeframe::Hour1 => Some(12),
            Timeframe::Hour4 => Some(48),
            Timeframe::Sec30 | Timeframe::Min5 => None,
        }
    }

    /// Interval length in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            Timeframe::Sec30 => 30,
            Timeframe::Min5 => 5 * 60,
            Timeframe::Min15 => 15 * 60,
            Timeframe::Hour1 => 60 * 60,
            Timeframe::Hour4 => 4 * 60 * 60,
        }
    }

    /// Wire label used by candle suppliers (`interval=` parameter).
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Sec30 => "30s",
            Timeframe::Min5 => "5min",
            Timeframe::Min15 => "15min",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
        }
    }

    /// Tiers evaluated in one cycle: base plus derived, plus the precision
    /// tier when enabled.
    pub fn evaluated(precision_mode: bool) -> Vec<Timeframe> {
        let mut tiers = Vec::with_capacity(5);
        if precision_mode {
            tiers.push(Timeframe::Sec30);
        }
        tiers.push(Timeframe::BASE);
        tiers.extend(Timeframe::DERIVED);
        tiers
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

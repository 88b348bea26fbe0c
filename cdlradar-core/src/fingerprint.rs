//! Input fingerprinting: deterministic identity of the candles an analysis
//! was computed from.
//!
//! Callers that cache analyses compare fingerprints to skip recomputation
//! when a supplier hands back unchanged data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Candle;

/// BLAKE3 hex digest over the candle fields of an analysis input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFingerprint(pub String);

impl fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn hash_series(hasher: &mut blake3::Hasher, tag: &[u8], candles: &[Candle]) {
    hasher.update(tag);
    hasher.update(&(candles.len() as u64).to_le_bytes());
    for c in candles {
        hasher.update(&c.datetime.and_utc().timestamp().to_le_bytes());
        hasher.update(&c.open.to_le_bytes());
        hasher.update(&c.high.to_le_bytes());
        hasher.update(&c.low.to_le_bytes());
        hasher.update(&c.close.to_le_bytes());
        hasher.update(&c.volume.to_le_bytes());
    }
}

/// Fingerprint of the base series plus the optional precision series.
///
/// `None` and an empty precision series hash differently, since they
/// produce analyses with a different number of tiers.
pub fn fingerprint_input(base: &[Candle], precision: Option<&[Candle]>) -> InputFingerprint {
    let mut hasher = blake3::Hasher::new();
    hash_series(&mut hasher, b"base", base);
    if let Some(fine) = precision {
        hash_series(&mut hasher, b"precision", fine);
    }
    InputFingerprint(hasher.finalize().to_hex().to_string())
}

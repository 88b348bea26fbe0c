//! Majority-vote fusion of per-strategy signal maps.

use crate::domain::{SignalMap, SignalType, Timeframe};

/// Votes required for a side to win among `count` strategies: a strict
/// majority, `count / 2 + 1`.
pub fn majority_threshold(count: usize) -> usize {
    count / 2 + 1
}

/// Fuse one timeframe's votes.
///
/// Neutral votes count towards the total but never towards a side, so they
/// make consensus harder. No votes at all fuse to `Neutral`.
pub fn fuse_votes(votes: &[SignalType]) -> SignalType {
    if votes.is_empty() {
        return SignalType::Neutral;
    }
    let threshold = majority_threshold(votes.len());
    let buys = votes.iter().filter(|v| **v == SignalType::Buy).count();
    let sales = votes.iter().filter(|v| **v == SignalType::Sale).count();
    if buys >= threshold {
        SignalType::Buy
    } else if sales >= threshold {
        SignalType::Sale
    } else {
        SignalType::Neutral
    }
}

/// Fuse per-strategy maps over `timeframes`.
///
/// A timeframe missing from one strategy's map counts as that strategy's
/// `Neutral` vote. The result has exactly one entry per requested timeframe.
pub fn fuse(per_strategy: &[SignalMap], timeframes: &[Timeframe]) -> SignalMap {
    timeframes
        .iter()
        .map(|tf| {
            let votes: Vec<SignalType> = per_strategy
                .iter()
                .map(|map| map.get(tf).copied().unwrap_or_default())
                .collect();
            (*tf, fuse_votes(&votes))
        })
        .collect()
}

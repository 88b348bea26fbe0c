//! Signal components: the evaluate → fuse → score chain.
//!
//! - Strategy evaluators: per-timeframe directional votes
//! - Factory: configured strategy kinds → trait objects
//! - Fusion: majority vote across the ensemble
//! - Scorer: four additive filters → power score → action

pub mod factory;
pub mod fusion;
pub mod scorer;
pub mod strategy;

pub use factory::{build_ensemble, create_strategy, default_ensemble, FactoryError};
pub use fusion::{fuse, fuse_votes, majority_threshold};
pub use scorer::{score, Setup, Verdict, GOLDEN_RULE_SCORE, WATCH_SCORE};
pub use strategy::{StrategyEvaluator, StrategyKind};

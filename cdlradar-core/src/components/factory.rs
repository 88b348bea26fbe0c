//! Factory system: converts configured `StrategyKind`s into runtime trait
//! objects.

use super::strategy::{
    MaCrossover, MacdCrossover, SqueezeMomentum, StrategyEvaluator, StrategyKind, SwingStructure,
    TrendRsi,
};

// ─── Error type ──────────────────────────────────────────────────────

/// Errors that can occur while assembling an ensemble.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FactoryError {
    #[error("Unknown strategy type: {0}")]
    UnknownStrategy(String),
    #[error("Strategy ensemble is empty")]
    EmptyEnsemble,
    #[error("Strategy listed twice in ensemble: {0}")]
    DuplicateStrategy(StrategyKind),
}

// ─── Strategy factory ────────────────────────────────────────────────

/// Create one evaluator with its standard parameters.
pub fn create_strategy(kind: StrategyKind) -> Box<dyn StrategyEvaluator> {
    match kind {
        StrategyKind::MaCrossover => Box::new(MaCrossover::default()),
        StrategyKind::SwingStructure => Box::new(SwingStructure::default()),
        StrategyKind::SqueezeMomentum => Box::new(SqueezeMomentum::default()),
        StrategyKind::Macd => Box::new(MacdCrossover::default()),
        StrategyKind::TrendRsi => Box::new(TrendRsi::default()),
    }
}

/// Create an evaluator from its configured name.
pub fn create_strategy_by_name(name: &str) -> Result<Box<dyn StrategyEvaluator>, FactoryError> {
    name.parse::<StrategyKind>().map(create_strategy)
}

/// Build an ensemble. Order is preserved; empty or repeated entries are
/// rejected.
pub fn build_ensemble(kinds: &[StrategyKind]) -> Result<Vec<Box<dyn StrategyEvaluator>>, FactoryError> {
    if kinds.is_empty() {
        return Err(FactoryError::EmptyEnsemble);
    }
    for (i, kind) in kinds.iter().enumerate() {
        if kinds[..i].contains(kind) {
            return Err(FactoryError::DuplicateStrategy(*kind));
        }
    }
    Ok(kinds.iter().copied().map(create_strategy).collect())
}

/// The default three-member ensemble.
pub fn default_ensemble() -> Vec<Box<dyn StrategyEvaluator>> {
    StrategyKind::DEFAULT_ENSEMBLE
        .iter()
        .copied()
        .map(create_strategy)
        .collect()
}

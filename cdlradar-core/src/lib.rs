//! CDLRadar Core: candles, indicators, resampling, strategy ensemble,
//! signal fusion and power scoring.
//!
//! This crate contains the analysis engine:
//! - Domain types (candles, timeframes, signals, actions, analyses)
//! - Pure indicator library
//! - Candle suppliers and fixed-factor resampling
//! - Strategy evaluators behind one trait, built by a factory
//! - Majority-vote fusion and the four-filter power scorer
//! - `AnalysisPipeline`, the single evaluation entry point

pub mod components;
pub mod data;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod indicators;
pub mod rng;

pub use engine::{AnalysisPipeline, AnalysisRequest, PipelineError};

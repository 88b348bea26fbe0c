//! Analysis engine: turns one instrument's candles into a scored
//! multi-timeframe recommendation.

pub mod pipeline;

pub use pipeline::{AnalysisPipeline, AnalysisRequest, PipelineError};

//! Domain types for CDLRadar

pub mod analysis;
pub mod candle;
pub mod instrument;
pub mod signal;
pub mod timeframe;

pub use analysis::{MultiTimeframeAnalysis, ScoreBreakdown};
pub use candle::Candle;
pub use instrument::{AssetClass, Instrument, InstrumentError};
pub use signal::{ActionType, SignalMap, SignalType};
pub use timeframe::Timeframe;

//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{BollingerBandsIndicator, IndicatorParams, IndicatorSnapshot, RsiIndicator};
pub use signal::{SignalAlert, Thresholds};

//! Threshold check combining RSI and Bollinger %B.

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::Thresholds;

/// True when both indicators are defined and at or below their thresholds.
pub fn evaluate(snapshot: &IndicatorSnapshot, thresholds: &Thresholds) -> bool {
    let rsi_ok = snapshot
        .rsi
        .is_some_and(|rsi| rsi <= thresholds.rsi_max);
    let percent_b_ok = snapshot
        .percent_b
        .is_some_and(|percent_b| percent_b <= thresholds.percent_b_max);

    rsi_ok && percent_b_ok
}

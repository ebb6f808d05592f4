//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerBandsIndicator;

/// Calculate Bollinger Bands over the trailing `period` closes
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
pub fn calculate_bollinger_bands(
    closes: &[f64],
    period: u32,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    if period == 0 || closes.len() < period as usize {
        return None;
    }

    let middle = math::sma(closes, period as usize)?;
    let std = math::standard_deviation(closes, period as usize)?;

    let upper = middle + (std_dev * std);
    let lower = middle - (std_dev * std);

    Some(BollingerBandsIndicator {
        upper,
        middle,
        lower,
        period,
        std_dev,
    })
}

/// Bollinger %B of the latest close.
///
/// `None` when there are fewer than `period` closes or the bands have zero width.
pub fn calculate_bollinger_percent_b(closes: &[f64], period: u32, std_dev: f64) -> Option<f64> {
    let last = *closes.last()?;
    calculate_bollinger_bands(closes, period, std_dev)?.percent_b(last)
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(closes: &[f64]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(closes, 20, 2.0)
}

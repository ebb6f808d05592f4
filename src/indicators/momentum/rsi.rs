//! RSI (Relative Strength Index) indicator

use crate::models::indicators::RsiIndicator;

/// Calculate RSI over the most recent `period` price changes
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// With no losses in the window the RSI saturates at 100.
pub fn calculate_rsi(closes: &[f64], period: u32) -> Option<RsiIndicator> {
    let period_len = period as usize;
    if period_len == 0 || closes.len() < period_len + 1 {
        return None;
    }

    let window = &closes[closes.len() - (period_len + 1)..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(RsiIndicator {
            value: 100.0,
            period,
        });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Some(RsiIndicator { value: rsi, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Option<RsiIndicator> {
    calculate_rsi(closes, 14)
}

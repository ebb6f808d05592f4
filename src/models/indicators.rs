use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::calculate_rsi;
use crate::indicators::volatility::calculate_bollinger_bands;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

impl BollingerBandsIndicator {
    /// Position of `price` inside the bands: 0 at the lower band, 1 at the upper band.
    ///
    /// Returns `None` when the bands have collapsed (zero variance). Widths within
    /// float rounding of the middle band count as collapsed.
    pub fn percent_b(&self, price: f64) -> Option<f64> {
        let width = self.upper - self.lower;
        let tolerance = self.middle.abs().max(1.0) * 1e-12;
        if !width.is_finite() || width <= tolerance {
            return None;
        }
        Some((price - self.lower) / width)
    }
}

/// Lookback parameters for the two indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: u32,
    pub bb_window: u32,
    pub bb_k: f64,
}

impl IndicatorParams {
    /// Minimum number of closes needed to compute both indicators.
    pub fn required_closes(&self) -> usize {
        (self.rsi_period as usize + 1).max(self.bb_window as usize)
    }
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bb_window: 20,
            bb_k: 2.0,
        }
    }
}

/// Indicator values for one instrument, derived fresh every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_b: Option<f64>,
    pub last_price: f64,
}

impl IndicatorSnapshot {
    pub fn from_closes(closes: &[f64], params: &IndicatorParams) -> Result<Self, IndicatorError> {
        let required = params.required_closes();
        let last_price = match closes.last() {
            Some(&price) if closes.len() >= required => price,
            _ => {
                return Err(IndicatorError::InsufficientData {
                    required,
                    actual: closes.len(),
                })
            }
        };

        let rsi = calculate_rsi(closes, params.rsi_period).map(|r| r.value);
        let percent_b = calculate_bollinger_bands(closes, params.bb_window, params.bb_k)
            .and_then(|bands| bands.percent_b(last_price));

        Ok(Self {
            rsi,
            percent_b,
            last_price,
        })
    }
}

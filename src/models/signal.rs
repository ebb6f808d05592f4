use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Alert thresholds. A signal needs both indicators at or below their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub rsi_max: f64,
    pub percent_b_max: f64,
    /// Fraction the price must fall below the last alert price before re-firing.
    pub rearm_drop_fraction: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rsi_max: 30.0,
            percent_b_max: 0.2,
            rearm_drop_fraction: 0.01,
        }
    }
}

/// A fired signal ready to be handed to a notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalAlert {
    pub symbol: String,
    pub price: f64,
    pub rsi: f64,
    pub percent_b: f64,
    pub fired_at: DateTime<Local>,
}

impl SignalAlert {
    /// Human readable message body.
    pub fn render(&self) -> String {
        format!(
            "Coin: {}\nSignal fired: {}\nPrice: {}",
            self.symbol,
            self.fired_at.format("%d.%m.%Y %H:%M"),
            format_price(self.price)
        )
    }
}

/// Two decimals for regular prices, six for sub-unit ones so they do not round to zero.
pub fn format_price(price: f64) -> String {
    if price.abs() < 1.0 {
        format!("{:.6}", price)
    } else {
        format!("{:.2}", price)
    }
}

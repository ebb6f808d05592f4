//! Re-arm gate: suppresses repeat alerts until price falls further.

use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Last alert price per instrument, kept for the lifetime of the process.
///
/// Entries are inserted or overwritten, never removed. The whole
/// read-compare-commit of [`RearmState::should_fire`] runs under one lock,
/// so concurrent evaluations of the same instrument cannot interleave.
#[derive(Debug, Default)]
pub struct RearmState {
    last_signal: Mutex<HashMap<String, f64>>,
}

impl RearmState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a signal may fire, committing `price` as the new
    /// reference when it does.
    ///
    /// An instrument that already fired re-arms only once
    /// `price <= last * (1 - drop_fraction)`.
    pub async fn should_fire(
        &self,
        symbol: &str,
        price: f64,
        signal: bool,
        drop_fraction: f64,
    ) -> bool {
        if !signal {
            return false;
        }

        let mut last_signal = self.last_signal.lock().await;
        let fire = match last_signal.get(symbol) {
            None => true,
            Some(&last) => price <= last * (1.0 - drop_fraction),
        };

        if fire {
            last_signal.insert(symbol.to_string(), price);
        } else {
            debug!(
                symbol = %symbol,
                price = price,
                last = ?last_signal.get(symbol),
                "RearmState: suppressing repeat signal for {}",
                symbol
            );
        }

        fire
    }

    /// Reference price of the last fired signal, if any.
    pub async fn last_price(&self, symbol: &str) -> Option<f64> {
        self.last_signal.lock().await.get(symbol).copied()
    }

    pub async fn len(&self) -> usize {
        self.last_signal.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.last_signal.lock().await.is_empty()
    }
}

//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Transport failure, including request timeouts.
    #[error("market data request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("market data endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed market data: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Closing prices of the `limit` most recent candles, oldest first.
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, MarketDataError>;
}

//! Binance klines REST client

use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Index of the close price inside a Binance kline array.
const CLOSE_FIELD: usize = 4;

pub struct BinanceMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceMarketDataProvider {
    /// Build a provider whose requests are bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, MarketDataError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", interval),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let closes = parse_closes(&text)?;
        debug!(
            symbol = %symbol,
            count = closes.len(),
            "BinanceMarketDataProvider: fetched {} closes for {}",
            closes.len(),
            symbol
        );
        Ok(closes)
    }
}

/// Extract close prices from a klines payload: an array of arrays whose
/// fifth element is the close, encoded as a decimal string.
pub fn parse_closes(body: &str) -> Result<Vec<f64>, MarketDataError> {
    let klines: Vec<Vec<Value>> =
        serde_json::from_str(body).map_err(|e| MarketDataError::Malformed(e.to_string()))?;

    klines
        .iter()
        .enumerate()
        .map(|(i, kline)| {
            let field = kline.get(CLOSE_FIELD).ok_or_else(|| {
                MarketDataError::Malformed(format!("kline {} has no close field", i))
            })?;
            let close = match field {
                Value::String(s) => s.parse::<f64>().map_err(|e| {
                    MarketDataError::Malformed(format!("kline {} close '{}': {}", i, s, e))
                })?,
                Value::Number(n) => n.as_f64().ok_or_else(|| {
                    MarketDataError::Malformed(format!("kline {} close is not a float", i))
                })?,
                other => {
                    return Err(MarketDataError::Malformed(format!(
                        "kline {} close has unexpected type: {}",
                        i, other
                    )))
                }
            };
            if !close.is_finite() {
                return Err(MarketDataError::Malformed(format!(
                    "kline {} close is not finite",
                    i
                )));
            }
            Ok(close)
        })
        .collect()
}

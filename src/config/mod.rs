//! Process configuration read from the environment.
//!
//! Only the worker binary calls into this module; the library core receives
//! the typed values it produces.

use crate::models::indicators::IndicatorParams;
use crate::models::signal::Thresholds;
use crate::services::binance::DEFAULT_BINANCE_BASE_URL;
use crate::services::notifier::DEFAULT_TELEGRAM_BASE_URL;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_COINS: &[&str] = &["BNB", "BTC", "ETH", "LINK", "AVAX", "DOT", "TON", "SOL", "SUI"];
pub const DEFAULT_QUOTE_ASSET: &str = "USDC";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotifierConfig {
    Telegram {
        base_url: String,
        token: String,
        chat_id: String,
    },
    Log,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub symbols: Vec<String>,
    pub thresholds: Thresholds,
    pub params: IndicatorParams,
    pub candle_interval: String,
    pub eval_interval_seconds: u64,
    pub http_timeout: Duration,
    pub binance_base_url: String,
    pub notifier: NotifierConfig,
    /// HTTP port for `/health` and `/metrics`; 0 disables the server.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let quote = get("QUOTE_ASSET").unwrap_or_else(|| DEFAULT_QUOTE_ASSET.to_string());
        let symbols = match get("SYMBOLS") {
            Some(list) => parse_symbols(&list, &quote),
            None => parse_symbols(&DEFAULT_COINS.join(","), &quote),
        };
        if symbols.is_empty() {
            return Err(ConfigError::Invalid {
                key: "SYMBOLS",
                value: get("SYMBOLS").unwrap_or_default(),
            });
        }

        let defaults = Thresholds::default();
        let thresholds = Thresholds {
            rsi_max: parse_finite(&get, "RSI_MAX", defaults.rsi_max)?,
            percent_b_max: parse_finite(&get, "BB_PERCENT_MAX", defaults.percent_b_max)?,
            rearm_drop_fraction: parse_finite(&get, "REARM_DROP_FRACTION", defaults.rearm_drop_fraction)?,
        };
        if !(0.0..1.0).contains(&thresholds.rearm_drop_fraction) {
            return Err(ConfigError::Invalid {
                key: "REARM_DROP_FRACTION",
                value: thresholds.rearm_drop_fraction.to_string(),
            });
        }

        let default_params = IndicatorParams::default();
        let params = IndicatorParams {
            rsi_period: parse_positive(&get, "RSI_PERIOD", default_params.rsi_period)?,
            bb_window: parse_positive(&get, "BB_WINDOW", default_params.bb_window)?,
            bb_k: parse_finite(&get, "BB_K", default_params.bb_k)?,
        };
        if params.bb_k <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "BB_K",
                value: params.bb_k.to_string(),
            });
        }

        let eval_interval_seconds = parse_positive(&get, "EVAL_INTERVAL_SECONDS", 300u64)?;
        let http_timeout = Duration::from_secs(parse_positive(&get, "HTTP_TIMEOUT_SECONDS", 15u64)?);

        let notifier = match get("NOTIFIER").as_deref() {
            Some("log") => NotifierConfig::Log,
            None | Some("telegram") => NotifierConfig::Telegram {
                base_url: get("TELEGRAM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_BASE_URL.to_string()),
                token: get("TELEGRAM_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?,
                chat_id: get("TELEGRAM_CHAT_ID").ok_or(ConfigError::Missing("TELEGRAM_CHAT_ID"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "NOTIFIER",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            symbols,
            thresholds,
            params,
            candle_interval: get("CANDLE_INTERVAL").unwrap_or_else(|| "5m".to_string()),
            eval_interval_seconds,
            http_timeout,
            binance_base_url: get("BINANCE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BINANCE_BASE_URL.to_string()),
            notifier,
            port: parse_or(&get, "PORT", 8080u16)?,
        })
    }
}

/// Split a comma separated symbol list, upper-casing each entry and appending
/// `quote` to bare coins.
pub fn parse_symbols(list: &str, quote: &str) -> Vec<String> {
    let quote = quote.to_uppercase();
    let mut symbols: Vec<String> = list
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .map(|s| if s.ends_with(&quote) { s } else { format!("{}{}", s, quote) })
        .collect();
    let mut seen = std::collections::HashSet::new();
    symbols.retain(|s| seen.insert(s.clone()));
    symbols
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Like [`parse_or`] but rejects NaN and infinities, which would silently
/// fail every threshold comparison.
fn parse_finite<G>(get: &G, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let value: f64 = parse_or(get, key, default)?;
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn parse_positive<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default + ToString,
    G: Fn(&str) -> Option<String>,
{
    let value = parse_or(get, key, default)?;
    if !(value > T::default()) {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Get the current environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

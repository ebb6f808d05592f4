//! Binance spot market data over the public REST API

pub mod client;

pub use client::{BinanceMarketDataProvider, DEFAULT_BINANCE_BASE_URL};

//! External collaborators: market data and notification delivery.

pub mod binance;
pub mod market_data;
pub mod notifier;

pub use binance::BinanceMarketDataProvider;
pub use market_data::{MarketDataError, MarketDataProvider};
pub use notifier::{LogNotifier, Notifier, NotifyError, TelegramNotifier};

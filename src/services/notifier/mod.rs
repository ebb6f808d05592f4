//! Outbound alert delivery.

pub mod log;
pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use self::log::LogNotifier;
pub use telegram::{TelegramNotifier, DEFAULT_TELEGRAM_BASE_URL};

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure, including timeouts. Never carries the request URL.
    #[error("notification request failed: {0}")]
    Request(reqwest::Error),

    #[error("notification API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

/// Best-effort delivery of a rendered alert to a fixed destination.
///
/// Implementations do not retry; the caller logs failures and moves on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

//! Telegram Bot API notifier

use super::{Notifier, NotifyError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

/// JSON payload for the `sendMessage` endpoint.
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Request)?;
        Ok(Self::with_client(base_url, token, chat_id, client))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text: message,
        };

        // The URL embeds the bot token; strip it from transport errors before they get logged.
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(chat_id = %self.chat_id, "TelegramNotifier: message delivered");
        Ok(())
    }
}

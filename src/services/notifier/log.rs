use super::{Notifier, NotifyError};
use async_trait::async_trait;
use tracing::info;

/// Writes alerts to the log instead of an external channel.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        info!(message = %message, "LogNotifier: alert");
        Ok(())
    }
}

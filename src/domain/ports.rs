use crate::utils::error::Result;
use async_trait::async_trait;

/// Outbound message capability. One concrete provider is chosen at startup
/// and stays fixed for the process lifetime.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers one message and returns the provider's message id.
    async fn send_message(&self, to: &str, subject: &str, html: &str, text: &str)
        -> Result<String>;
}

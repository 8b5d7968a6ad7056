use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Dry-run provider: logs the message instead of delivering it. Useful for
/// rehearsing a draw before real credentials are configured.
#[derive(Debug, Default)]
pub struct ConsoleMailer {
    counter: AtomicU64,
}

impl ConsoleMailer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        _html: &str,
        text: &str,
    ) -> Result<String> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        tracing::info!(to, subject, body = text, "dry run, not sending");
        Ok(format!("console-{}", n))
    }
}

// Adapters layer: concrete mailers behind the domain's Mailer port.

pub mod console;
pub mod resend;
pub mod smtp;

pub use console::ConsoleMailer;
pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The closed set of providers. One variant is selected from configuration at
/// process start and stays fixed for the process lifetime; there is no
/// per-call fallback switching.
pub enum ProviderMailer {
    Resend(ResendMailer),
    Smtp(SmtpMailer),
    Console(ConsoleMailer),
}

impl std::fmt::Debug for ProviderMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProviderMailer").field(&self.name()).finish()
    }
}

impl ProviderMailer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resend(_) => "resend",
            Self::Smtp(_) => "smtp",
            Self::Console(_) => "console",
        }
    }
}

#[async_trait]
impl Mailer for ProviderMailer {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<String> {
        match self {
            Self::Resend(mailer) => mailer.send_message(to, subject, html, text).await,
            Self::Smtp(mailer) => mailer.send_message(to, subject, html, text).await,
            Self::Console(mailer) => mailer.send_message(to, subject, html, text).await,
        }
    }
}

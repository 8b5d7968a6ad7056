#[cfg(feature = "cli")]
pub mod cli;
pub mod mailer;
pub mod plan;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use mailer::{MailerSettings, ResendSettings, SmtpSettings};
pub use plan::DrawPlan;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ConsoleMailer, ProviderMailer, ResendMailer, SmtpMailer};
pub use config::{DrawPlan, MailerSettings};
pub use core::dispatch::{Dispatcher, Envelope, RetryPolicy};
pub use core::draw::{draw_assignment, verify_pairings, MAX_DRAW_ATTEMPTS};
pub use core::engine::DrawEngine;
pub use core::exclusions::ExclusionGraph;
pub use core::template::{render, RenderedEmail, DEFAULT_SUBJECT, PLACEHOLDER};
pub use domain::model::{
    Assignment, DeliveryOutcome, DeliveryStatus, DispatchReport, DrawOutcome, Pairing, Participant,
};
pub use domain::ports::Mailer;
pub use utils::error::{Result, SantaError};

pub mod dispatch;
pub mod draw;
pub mod engine;
pub mod exclusions;
pub mod template;

pub use crate::domain::model::{Assignment, DispatchReport, DrawOutcome, Participant};
pub use crate::domain::ports::Mailer;
pub use crate::utils::error::Result;

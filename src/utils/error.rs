use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("at least 2 participants are required, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("participant emails must be unique, found duplicate: {email}")]
    DuplicateParticipant { email: String },

    #[error("no assignment satisfies the exclusion constraints after {attempts} attempts")]
    ConstraintUnsatisfiable { attempts: u32 },

    #[error("accepted assignment failed re-verification: {reason}")]
    AssignmentVerificationFailed { reason: String },

    #[error("provider rejected the message ({status}): {message}")]
    ProviderRejected { status: u16, message: String },

    #[error("provider request failed: {0}")]
    ProviderRequest(#[from] reqwest::Error),

    #[error("SMTP transport error: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),

    #[error("could not build email message: {0}")]
    EmailMessage(#[from] lettre::error::Error),

    #[error("invalid email address: {0}")]
    EmailAddress(#[from] lettre::address::AddressError),

    #[error("send attempt timed out after {seconds}s")]
    SendTimeout { seconds: u64 },

    #[error("missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse draw plan: {0}")]
    PlanParse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SantaError>;

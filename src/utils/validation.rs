use crate::domain::model::Participant;
use crate::utils::error::{Result, SantaError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SantaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if !EMAIL_SHAPE.is_match(value) {
        return Err(SantaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value is not an email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SantaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SantaError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SantaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Boundary check for one draw's participant list. The assignment engine
/// assumes these hold; the orchestrator re-runs this defensively.
pub fn validate_participants(participants: &[Participant]) -> Result<()> {
    if participants.len() < 2 {
        return Err(SantaError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for p in participants {
        validate_email("participants.email", &p.email)?;
        validate_non_empty_string("participants.nickname", &p.nickname)?;
        if let Some(partner) = &p.partner_email {
            validate_email("participants.partnerEmail", partner)?;
        }
        if !seen.insert(p.email.as_str()) {
            return Err(SantaError::DuplicateParticipant {
                email: p.email.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(email: &str, nickname: &str, partner: Option<&str>) -> Participant {
        Participant {
            email: email.to_string(),
            nickname: nickname.to_string(),
            partner_email: partner.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "alice@example.com").is_ok());
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "not-an-email").is_err());
        assert!(validate_email("email", "two words@example.com").is_err());
        assert!(validate_email("email", "missing@tld").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://api.resend.com").is_ok());
        assert!(validate_url("base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
        assert!(validate_url("base_url", "not a url").is_err());
    }

    #[test]
    fn test_validate_participants_minimum_size() {
        let solo = vec![participant("a@example.com", "A", None)];
        let err = validate_participants(&solo).unwrap_err();
        assert!(matches!(
            err,
            SantaError::InsufficientParticipants { count: 1 }
        ));
    }

    #[test]
    fn test_validate_participants_duplicate_email() {
        let group = vec![
            participant("a@example.com", "A", None),
            participant("b@example.com", "B", None),
            participant("a@example.com", "A again", None),
        ];
        let err = validate_participants(&group).unwrap_err();
        assert!(matches!(err, SantaError::DuplicateParticipant { email } if email == "a@example.com"));
    }

    #[test]
    fn test_validate_participants_ok() {
        let group = vec![
            participant("a@example.com", "A", Some("b@example.com")),
            participant("b@example.com", "B", Some("a@example.com")),
            participant("c@example.com", "C", None),
        ];
        assert!(validate_participants(&group).is_ok());
    }
}

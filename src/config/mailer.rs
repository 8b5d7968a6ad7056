use crate::adapters::{resend, ProviderMailer, ResendMailer, SmtpMailer};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_url, Validate};
use lettre::message::Mailbox;
use std::env;

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_NAME: &str = "Secret Santa";

#[derive(Debug, Clone)]
pub struct ResendSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

/// Provider configuration, read once from the process environment at startup
/// and read-only afterwards.
#[derive(Debug, Clone)]
pub struct MailerSettings {
    pub resend: Option<ResendSettings>,
    pub smtp: Option<SmtpSettings>,
    pub from_email: String,
    pub from_name: String,
}

impl MailerSettings {
    /// 從環境變數讀取寄信設定（RESEND_* 與 SMTP_*）
    pub fn from_env() -> Result<Self> {
        let resend = env_var("RESEND_API_KEY").map(|api_key| ResendSettings {
            api_key,
            base_url: env_var("RESEND_BASE_URL")
                .unwrap_or_else(|| resend::DEFAULT_BASE_URL.to_string()),
        });

        let smtp = match (env_var("SMTP_HOST"), env_var("SMTP_USER"), env_var("SMTP_PASS")) {
            (Some(host), Some(user), Some(pass)) => {
                let port = match env_var("SMTP_PORT") {
                    Some(raw) => raw.parse::<u16>().map_err(|_| SantaError::InvalidConfigValue {
                        field: "SMTP_PORT".to_string(),
                        value: raw.clone(),
                        reason: "Value must be a port number".to_string(),
                    })?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(SmtpSettings { host, port, user, pass })
            }
            _ => None,
        };

        let from_email = env_var("SMTP_FROM")
            .or_else(|| env_var("SMTP_USER"))
            .ok_or_else(|| SantaError::MissingConfig {
                field: "SMTP_FROM".to_string(),
            })?;
        let from_name = env_var("SMTP_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());

        Ok(Self {
            resend,
            smtp,
            from_email,
            from_name,
        })
    }

    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Picks the first configured provider: the hosted API wins over the SMTP
    /// relay. The choice is made once; callers hold on to the result.
    pub fn build_mailer(&self) -> Result<ProviderMailer> {
        self.validate()?;

        if let Some(settings) = &self.resend {
            tracing::info!("using hosted transactional API provider");
            return Ok(ProviderMailer::Resend(ResendMailer::with_base_url(
                &settings.api_key,
                self.from_header(),
                &settings.base_url,
            )));
        }

        if let Some(settings) = &self.smtp {
            tracing::info!(host = %settings.host, port = settings.port, "using SMTP relay provider");
            let from = self.from_header().parse::<Mailbox>()?;
            return Ok(ProviderMailer::Smtp(SmtpMailer::new(
                &settings.host,
                settings.port,
                &settings.user,
                &settings.pass,
                from,
            )?));
        }

        Err(SantaError::MissingConfig {
            field: "RESEND_API_KEY or SMTP_HOST/SMTP_USER/SMTP_PASS".to_string(),
        })
    }
}

impl Validate for MailerSettings {
    fn validate(&self) -> Result<()> {
        validate_email("SMTP_FROM", &self.from_email)?;
        validate_non_empty_string("SMTP_FROM_NAME", &self.from_name)?;

        if let Some(resend) = &self.resend {
            validate_non_empty_string("RESEND_API_KEY", &resend.api_key)?;
            validate_url("RESEND_BASE_URL", &resend.base_url)?;
        }
        if let Some(smtp) = &self.smtp {
            validate_non_empty_string("SMTP_HOST", &smtp.host)?;
            validate_non_empty_string("SMTP_USER", &smtp.user)?;
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> MailerSettings {
        MailerSettings {
            resend: None,
            smtp: None,
            from_email: "santa@example.com".to_string(),
            from_name: "Santa".to_string(),
        }
    }

    #[test]
    fn test_hosted_api_wins_over_smtp() {
        let mut settings = base_settings();
        settings.resend = Some(ResendSettings {
            api_key: "key".to_string(),
            base_url: "https://api.resend.com".to_string(),
        });
        settings.smtp = Some(SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: "user".to_string(),
            pass: "pass".to_string(),
        });

        let mailer = settings.build_mailer().unwrap();
        assert_eq!(mailer.name(), "resend");
    }

    #[test]
    fn test_smtp_is_the_fallback() {
        let mut settings = base_settings();
        settings.smtp = Some(SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: "user".to_string(),
            pass: "pass".to_string(),
        });

        let mailer = settings.build_mailer().unwrap();
        assert_eq!(mailer.name(), "smtp");
    }

    #[test]
    fn test_no_provider_configured_is_an_error() {
        let err = base_settings().build_mailer().unwrap_err();
        assert!(matches!(err, SantaError::MissingConfig { .. }));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut settings = base_settings();
        settings.resend = Some(ResendSettings {
            api_key: "key".to_string(),
            base_url: "ftp://nope".to_string(),
        });

        let err = settings.build_mailer().unwrap_err();
        assert!(matches!(err, SantaError::InvalidConfigValue { field, .. } if field == "RESEND_BASE_URL"));
    }

    #[test]
    fn test_from_header_format() {
        assert_eq!(base_settings().from_header(), "Santa <santa@example.com>");
    }
}

use crate::domain::ports::Mailer;
use crate::utils::error::{Result, SantaError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Hosted transactional email API. The base URL is overridable so tests can
/// point the client at a local mock server.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    base_url: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self::with_base_url(api_key, from, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        from: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
            from: from.into(),
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<String> {
        let url = format!("{}/emails", self.base_url);
        let body = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
            text,
        };

        tracing::debug!(%url, to, "posting message to provider");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SantaError::ProviderRejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SendEmailResponse = response.json().await?;
        Ok(parsed.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_send_message_returns_provider_id() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/emails")
                .header("authorization", "Bearer test-key")
                .json_body_partial(
                    r#"{"to": ["alice@example.com"], "subject": "hello", "text": "plain"}"#,
                );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "email_123"}));
        });

        let mailer = ResendMailer::with_base_url("test-key", "Santa <santa@example.com>", server.url(""));
        let id = mailer
            .send_message("alice@example.com", "hello", "<p>plain</p>", "plain")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(id, "email_123");
    }

    #[tokio::test]
    async fn test_rejection_carries_status_and_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/emails");
            then.status(422).body("invalid recipient");
        });

        let mailer = ResendMailer::with_base_url("test-key", "Santa <santa@example.com>", server.url(""));
        let err = mailer
            .send_message("broken", "hello", "<p>x</p>", "x")
            .await
            .unwrap_err();

        api_mock.assert();
        match err {
            SantaError::ProviderRejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "invalid recipient");
            }
            other => panic!("expected ProviderRejected, got {:?}", other),
        }
    }
}

use crate::core::template::RenderedEmail;
use crate::domain::model::{DeliveryOutcome, DeliveryStatus, DispatchReport};
use crate::domain::ports::Mailer;
use crate::utils::error::SantaError;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Per-recipient retry and batch pacing knobs. Defaults match the provider's
/// observed limits; tests shrink every field.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Each attempt races the provider call against this deadline.
    pub attempt_timeout: Duration,
    /// Wait `attempt * backoff_unit` between attempts (2s, 4s, ...).
    pub backoff_unit: Duration,
    /// Fixed delay between sequential sends, success or not. The provider
    /// enforces a low requests-per-second ceiling; parallel fan-out would
    /// only convert into throttling errors.
    pub pacing: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(30),
            backoff_unit: Duration::from_secs(2),
            pacing: Duration::from_millis(600),
        }
    }
}

/// One rendered message addressed to one recipient.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub to: String,
    pub subject: String,
    pub email: RenderedEmail,
}

pub struct Dispatcher<M: Mailer> {
    mailer: M,
    policy: RetryPolicy,
}

impl<M: Mailer> Dispatcher<M> {
    pub fn new(mailer: M) -> Self {
        Self::with_policy(mailer, RetryPolicy::default())
    }

    pub fn with_policy(mailer: M, policy: RetryPolicy) -> Self {
        Self { mailer, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Sends one envelope. Never escalates: every failure mode, timeout
    /// included, is captured in the returned outcome so one recipient can
    /// never abort the batch.
    pub async fn send_one(&self, envelope: &Envelope) -> DeliveryOutcome {
        let mut last_error = None;

        for attempt in 1..=self.policy.max_attempts {
            let call = self.mailer.send_message(
                &envelope.to,
                &envelope.subject,
                &envelope.email.html,
                &envelope.email.text,
            );

            match timeout(self.policy.attempt_timeout, call).await {
                Ok(Ok(message_id)) => {
                    tracing::info!(to = %envelope.to, attempt, %message_id, "message sent");
                    return DeliveryOutcome {
                        recipient: envelope.to.clone(),
                        status: DeliveryStatus::Sent,
                        attempts: attempt,
                        message_id: Some(message_id),
                        last_error: None,
                    };
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        to = %envelope.to,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        error = %e,
                        "send attempt failed"
                    );
                    last_error = Some(e.to_string());
                }
                Err(_) => {
                    let e = SantaError::SendTimeout {
                        seconds: self.policy.attempt_timeout.as_secs(),
                    };
                    tracing::warn!(
                        to = %envelope.to,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        "send attempt timed out"
                    );
                    last_error = Some(e.to_string());
                }
            }

            if attempt < self.policy.max_attempts {
                sleep(self.policy.backoff_unit * attempt).await;
            }
        }

        tracing::error!(
            to = %envelope.to,
            attempts = self.policy.max_attempts,
            "delivery failed, giving up"
        );
        DeliveryOutcome {
            recipient: envelope.to.clone(),
            status: DeliveryStatus::Failed,
            attempts: self.policy.max_attempts,
            message_id: None,
            last_error,
        }
    }

    /// Walks the batch strictly in order with a fixed inter-send delay,
    /// collecting one outcome per envelope.
    pub async fn dispatch(&self, batch: &[Envelope]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for (i, envelope) in batch.iter().enumerate() {
            if i > 0 {
                sleep(self.policy.pacing).await;
            }
            report.push(self.send_one(envelope).await);
        }

        report
    }
}

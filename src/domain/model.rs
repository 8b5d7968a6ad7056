use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One person in a draw. `email` is the unique key; `partner_email` declares
/// a couple that must not draw each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub email: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_email: Option<String>,
}

/// giver → receiver edge of an accepted assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub giver: String,
    pub receiver: String,
    pub receiver_nickname: String,
}

/// A full constrained derangement, in participant insertion order.
/// Every email appears exactly once as giver and exactly once as receiver.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Assignment {
    pub pairs: Vec<Pairing>,
}

impl Assignment {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn receiver_of(&self, giver: &str) -> Option<&Pairing> {
        self.pairs.iter().find(|p| p.giver == giver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

/// Final delivery record for one recipient, after all retry attempts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub recipient: String,
    pub status: DeliveryStatus,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        self.status == DeliveryStatus::Sent
    }
}

/// Per-recipient outcomes for one draw, in assignment order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    pub outcomes: Vec<DeliveryOutcome>,
    pub sent: usize,
    pub failed: usize,
}

impl DispatchReport {
    pub fn push(&mut self, outcome: DeliveryOutcome) {
        match outcome.status {
            DeliveryStatus::Sent => self.sent += 1,
            DeliveryStatus::Failed => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn all_sent(&self) -> bool {
        self.failed == 0
    }

    pub fn failed_recipients(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_sent())
            .map(|o| o.recipient.as_str())
            .collect()
    }
}

/// What one completed draw hands back: the assignment is the unit of success,
/// delivery failures are reported alongside it rather than failing the draw.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    pub assignment: Assignment,
    pub report: DispatchReport,
    pub completed_at: DateTime<Utc>,
}

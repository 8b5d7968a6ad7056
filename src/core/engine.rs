use crate::core::dispatch::{Dispatcher, Envelope, RetryPolicy};
use crate::core::draw::{draw_assignment, MAX_DRAW_ATTEMPTS};
use crate::core::exclusions::ExclusionGraph;
use crate::core::template::{render, DEFAULT_SUBJECT};
use crate::domain::model::{Assignment, DrawOutcome, Participant};
use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use crate::utils::validation::validate_participants;
use chrono::Utc;
use rand::Rng;

/// Runs one complete draw: validate, build the exclusion graph, draw the
/// assignment, then render and dispatch one notification per pairing.
///
/// The assignment is the unit of success. Delivery failures are aggregated
/// into the report and never invalidate or retry the draw itself.
pub struct DrawEngine<M: Mailer> {
    dispatcher: Dispatcher<M>,
    subject: String,
    max_draw_attempts: u32,
}

impl<M: Mailer> DrawEngine<M> {
    pub fn new(mailer: M) -> Self {
        Self::with_policy(mailer, RetryPolicy::default())
    }

    pub fn with_policy(mailer: M, policy: RetryPolicy) -> Self {
        Self {
            dispatcher: Dispatcher::with_policy(mailer, policy),
            subject: DEFAULT_SUBJECT.to_string(),
            max_draw_attempts: MAX_DRAW_ATTEMPTS,
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn max_draw_attempts(mut self, cap: u32) -> Self {
        self.max_draw_attempts = cap;
        self
    }

    pub async fn run(
        &self,
        participants: &[Participant],
        template: Option<&str>,
    ) -> Result<DrawOutcome> {
        validate_participants(participants)?;
        let graph = ExclusionGraph::from_participants(participants);

        // thread_rng stays out of the suspended state machine
        let assignment = {
            let mut rng = rand::thread_rng();
            draw_assignment(participants, &graph, &mut rng, self.max_draw_attempts)?
        };

        self.notify(assignment, template).await
    }

    /// Same as `run` with the permutation source supplied by the caller, so
    /// a seeded RNG produces a fully deterministic draw.
    pub async fn run_with_rng<R: Rng>(
        &self,
        participants: &[Participant],
        template: Option<&str>,
        rng: &mut R,
    ) -> Result<DrawOutcome> {
        validate_participants(participants)?;
        let graph = ExclusionGraph::from_participants(participants);
        let assignment = draw_assignment(participants, &graph, rng, self.max_draw_attempts)?;

        self.notify(assignment, template).await
    }

    async fn notify(&self, assignment: Assignment, template: Option<&str>) -> Result<DrawOutcome> {
        tracing::info!(participants = assignment.len(), "draw accepted, notifying");

        let envelopes: Vec<Envelope> = assignment
            .pairs
            .iter()
            .map(|pair| Envelope {
                to: pair.giver.clone(),
                subject: self.subject.clone(),
                email: render(template, &pair.receiver_nickname),
            })
            .collect();

        let report = self.dispatcher.dispatch(&envelopes).await;

        if report.all_sent() {
            tracing::info!(sent = report.sent, "all notifications delivered");
        } else {
            tracing::warn!(
                sent = report.sent,
                failed = report.failed,
                "draw completed with delivery failures"
            );
        }

        Ok(DrawOutcome {
            assignment,
            report,
            completed_at: Utc::now(),
        })
    }
}

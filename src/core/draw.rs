use crate::core::exclusions::ExclusionGraph;
use crate::domain::model::{Assignment, Pairing, Participant};
use crate::utils::error::{Result, SantaError};
use rand::Rng;

/// Attempt cap for rejection sampling. With few declared couples relative to
/// group size the expected number of rejected permutations is small; the cap
/// turns structurally impossible inputs into a typed failure instead of an
/// endless loop.
pub const MAX_DRAW_ATTEMPTS: u32 = 500;

/// Draws a constrained derangement: a uniform random permutation is resampled
/// until no participant is paired with themselves or with an excluded id.
///
/// Preconditions (owned by the caller): at least 2 participants, unique emails.
/// The RNG is injected so tests can assert exact outcomes from a fixed seed.
pub fn draw_assignment<R: Rng>(
    participants: &[Participant],
    graph: &ExclusionGraph,
    rng: &mut R,
    max_attempts: u32,
) -> Result<Assignment> {
    let mut order: Vec<usize> = (0..participants.len()).collect();

    for attempt in 1..=max_attempts {
        fisher_yates(&mut order, rng);

        let accepted = order
            .iter()
            .enumerate()
            .all(|(k, &r)| !graph.excludes(&participants[k].email, &participants[r].email));
        if !accepted {
            continue;
        }

        // Full second pass over the accepted permutation, written against the
        // raw pairing checks rather than the loop above, so a slip in the
        // acceptance logic cannot leak an unsound assignment.
        verify_pairings(participants, graph, &order)?;

        tracing::debug!(attempt, group = participants.len(), "permutation accepted");
        return Ok(build_assignment(participants, &order));
    }

    Err(SantaError::ConstraintUnsatisfiable {
        attempts: max_attempts,
    })
}

/// In-place Fisher–Yates: walk `i` from the last index down, swap with a
/// uniform `j` in `[0, i]`.
fn fisher_yates<R: Rng>(order: &mut [usize], rng: &mut R) {
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
}

/// Independent re-check of every pairing in `order`. Never returns an
/// unsound permutation to the caller; a failure here is a defect signal.
pub fn verify_pairings(
    participants: &[Participant],
    graph: &ExclusionGraph,
    order: &[usize],
) -> Result<()> {
    for (k, &r) in order.iter().enumerate() {
        let giver = &participants[k];
        let receiver = &participants[r];

        if giver.email == receiver.email {
            return Err(SantaError::AssignmentVerificationFailed {
                reason: format!("{} was paired with themselves", giver.email),
            });
        }

        let excluded = graph
            .excluded_for(&giver.email)
            .is_some_and(|set| set.contains(&receiver.email));
        if excluded {
            return Err(SantaError::AssignmentVerificationFailed {
                reason: format!("{} was paired with excluded {}", giver.email, receiver.email),
            });
        }
    }

    Ok(())
}

fn build_assignment(participants: &[Participant], order: &[usize]) -> Assignment {
    let pairs = order
        .iter()
        .enumerate()
        .map(|(k, &r)| Pairing {
            giver: participants[k].email.clone(),
            receiver: participants[r].email.clone(),
            receiver_nickname: participants[r].nickname.clone(),
        })
        .collect();

    Assignment { pairs }
}

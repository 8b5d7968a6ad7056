use crate::domain::model::Participant;
use std::collections::{HashMap, HashSet};

/// Symmetric relation of email pairs that must not draw each other, derived
/// from declared partners. Built once per draw, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExclusionGraph {
    edges: HashMap<String, HashSet<String>>,
}

impl ExclusionGraph {
    /// Inserts both directions for every declared partner. A partner email
    /// that is not itself a participant leaves an inert entry in the graph.
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut edges: HashMap<String, HashSet<String>> = HashMap::new();

        for p in participants {
            if let Some(partner) = &p.partner_email {
                edges
                    .entry(p.email.clone())
                    .or_default()
                    .insert(partner.clone());
                edges
                    .entry(partner.clone())
                    .or_default()
                    .insert(p.email.clone());
            }
        }

        Self { edges }
    }

    /// Self-assignment is implicitly excluded for every id, without a stored edge.
    pub fn excludes(&self, giver: &str, receiver: &str) -> bool {
        if giver == receiver {
            return true;
        }
        self.edges
            .get(giver)
            .is_some_and(|excluded| excluded.contains(receiver))
    }

    pub fn excluded_for(&self, giver: &str) -> Option<&HashSet<String>> {
        self.edges.get(giver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(email: &str, partner: Option<&str>) -> Participant {
        Participant {
            email: email.to_string(),
            nickname: email.split('@').next().unwrap().to_string(),
            partner_email: partner.map(str::to_string),
        }
    }

    #[test]
    fn test_partner_exclusion_is_symmetric() {
        // Only A declares the partnership; B's side must be derived
        let group = vec![
            participant("a@example.com", Some("b@example.com")),
            participant("b@example.com", None),
            participant("c@example.com", None),
        ];
        let graph = ExclusionGraph::from_participants(&group);

        assert!(graph.excludes("a@example.com", "b@example.com"));
        assert!(graph.excludes("b@example.com", "a@example.com"));
        assert!(!graph.excludes("a@example.com", "c@example.com"));
        assert!(!graph.excludes("c@example.com", "b@example.com"));
    }

    #[test]
    fn test_self_assignment_always_excluded() {
        let group = vec![participant("a@example.com", None)];
        let graph = ExclusionGraph::from_participants(&group);
        assert!(graph.excludes("a@example.com", "a@example.com"));
    }

    #[test]
    fn test_unknown_partner_is_inert() {
        let group = vec![
            participant("a@example.com", Some("nobody@example.com")),
            participant("b@example.com", None),
        ];
        let graph = ExclusionGraph::from_participants(&group);

        // The dangling edge exists but never matches a real participant
        assert!(graph.excludes("a@example.com", "nobody@example.com"));
        assert!(!graph.excludes("a@example.com", "b@example.com"));
        assert!(graph.excluded_for("nobody@example.com").is_some());
    }

    #[test]
    fn test_no_partners_means_empty_graph() {
        let group = vec![
            participant("a@example.com", None),
            participant("b@example.com", None),
        ];
        let graph = ExclusionGraph::from_participants(&group);
        assert!(graph.excluded_for("a@example.com").is_none());
        assert!(!graph.excludes("a@example.com", "b@example.com"));
    }
}

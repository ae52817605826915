//! Quorum gating: is there enough feedback, from enough authority, to
//! aggregate this round?

use serde::{Deserialize, Serialize};
use tracing::debug;
use verdict_core::models::latest_per_contributor;
use verdict_core::{ContributorId, FeedbackEntry, FxHashMap, TaskPolicy};

/// The gate's verdict for the data collected so far.
///
/// Monotone under append: entries are append-only and weights are fixed for
/// the round, so `count` and `authority_mass` only grow — re-evaluating after
/// more entries arrive can never flip `met` from true back to false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuorumDecision {
    /// True iff BOTH thresholds are satisfied.
    pub met: bool,
    /// Effective (deduplicated) vote count.
    pub count: usize,
    /// Total authority mass behind the effective votes.
    pub authority_mass: f64,
}

/// Evaluate the quorum policy against the current feedback.
///
/// Votes are deduplicated to the latest entry per contributor first; entries
/// whose contributor has no weight in the table contribute zero mass.
pub fn evaluate(
    entries: &[FeedbackEntry],
    authority_weights: &FxHashMap<ContributorId, f64>,
    policy: &TaskPolicy,
) -> QuorumDecision {
    let effective = latest_per_contributor(entries);
    let count = effective.len();
    let authority_mass: f64 = effective
        .iter()
        .map(|entry| authority_weights.get(&entry.contributor_id).copied().unwrap_or(0.0))
        .sum();

    let met = count >= policy.min_quorum_count && authority_mass >= policy.min_quorum_authority_mass;
    debug!(
        count,
        authority_mass,
        min_count = policy.min_quorum_count,
        min_mass = policy.min_quorum_authority_mass,
        met,
        "quorum evaluated"
    );
    QuorumDecision {
        met,
        count,
        authority_mass,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use verdict_core::StructuredJudgment;

    use super::*;

    fn entry(contributor: &str, minute: u32) -> FeedbackEntry {
        FeedbackEntry {
            contributor_id: contributor.into(),
            task_id: "task-1".into(),
            entity_type: "legal_analysis".into(),
            judgment: StructuredJudgment::categorical("valid"),
            note: None,
            submitted_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap(),
        }
    }

    fn weights(pairs: &[(&str, f64)]) -> FxHashMap<ContributorId, f64> {
        pairs.iter().map(|(id, w)| ((*id).into(), *w)).collect()
    }

    #[test]
    fn both_thresholds_required() {
        let policy = TaskPolicy {
            min_quorum_count: 2,
            min_quorum_authority_mass: 1.0,
            ..TaskPolicy::default()
        };
        let entries = vec![entry("a", 0), entry("b", 1)];

        // Count met, mass not.
        let low_mass = evaluate(&entries, &weights(&[("a", 0.3), ("b", 0.3)]), &policy);
        assert!(!low_mass.met);
        assert_eq!(low_mass.count, 2);

        // Mass met, count not.
        let single = evaluate(&entries[..1], &weights(&[("a", 1.5)]), &policy);
        assert!(!single.met);

        // Both met.
        let both = evaluate(&entries, &weights(&[("a", 0.6), ("b", 0.4)]), &policy);
        assert!(both.met);
    }

    #[test]
    fn boundary_is_inclusive() {
        let policy = TaskPolicy {
            min_quorum_count: 2,
            min_quorum_authority_mass: 1.0,
            ..TaskPolicy::default()
        };
        let entries = vec![entry("a", 0), entry("b", 1)];
        let at_boundary = evaluate(&entries, &weights(&[("a", 0.5), ("b", 0.5)]), &policy);
        assert!(at_boundary.met, "exact thresholds must satisfy quorum");
    }

    #[test]
    fn duplicate_votes_do_not_inflate_quorum() {
        let policy = TaskPolicy {
            min_quorum_count: 3,
            min_quorum_authority_mass: 0.0,
            ..TaskPolicy::default()
        };
        let entries = vec![entry("a", 0), entry("a", 1), entry("a", 2)];
        let decision = evaluate(&entries, &weights(&[("a", 1.0)]), &policy);
        assert_eq!(decision.count, 1);
        assert!(!decision.met);
        assert!((decision.authority_mass - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_contributor_contributes_zero_mass() {
        let policy = TaskPolicy {
            min_quorum_count: 1,
            min_quorum_authority_mass: 0.5,
            ..TaskPolicy::default()
        };
        let decision = evaluate(&[entry("ghost", 0)], &weights(&[]), &policy);
        assert_eq!(decision.count, 1);
        assert_eq!(decision.authority_mass, 0.0);
        assert!(!decision.met);
    }
}

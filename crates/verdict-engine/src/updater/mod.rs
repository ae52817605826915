//! Authority updates after a finalized round.
//!
//! Pure: returns the updated contributor values and audit events; the caller
//! persists both, serializing writes per contributor and using the
//! (contributor, task) pair as the idempotence key.

use tracing::{info, warn};
use verdict_core::models::{latest_per_contributor, AuthorityUpdateEvent, TrackRecordDelta};
use verdict_core::{
    AggregationStatus, ConsensusValue, Contributor, ContributorId, EngineConfig, FeedbackEntry,
    FinalizedResult, FxHashMap, VerdictError, VerdictResult,
};

use crate::authority::{update_recent_performance, update_track_record};

/// One contributor's refreshed scores plus the audit event explaining them.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub contributor: Contributor,
    pub event: AuthorityUpdateEvent,
}

/// Recompute track records for every contributor who voted in a newly
/// finalized round. Exactly one event per (contributor, task) pair; voters
/// not in the registry (or deactivated) are skipped; contributors who did
/// not vote are untouched.
///
/// Only `Consensus` and `Uncertain` rounds carry a quality signal. An
/// `InsufficientQuorum` result was never finalizable, and a `Controversial`
/// round's community verdict is disputed against ground truth — neither may
/// move anyone's track record.
pub fn apply_round(
    result: &FinalizedResult,
    entries: &[FeedbackEntry],
    contributors: &[Contributor],
    config: &EngineConfig,
) -> VerdictResult<Vec<UpdateOutcome>> {
    match result.status {
        AggregationStatus::Consensus | AggregationStatus::Uncertain => {}
        other => {
            return Err(VerdictError::State {
                reason: format!(
                    "authority updates require a consensus or uncertain result, got {other} for task {}",
                    result.task_id
                ),
            });
        }
    }

    let registry: FxHashMap<&ContributorId, &Contributor> =
        contributors.iter().map(|c| (&c.id, c)).collect();
    let tolerance = config.updater.numeric_match_tolerance * config.controversy.expected_range;

    let effective = latest_per_contributor(entries);
    let mut outcomes = Vec::with_capacity(effective.len());
    for entry in effective {
        let Some(&contributor) = registry.get(&entry.contributor_id) else {
            warn!(
                contributor_id = %entry.contributor_id,
                task_id = %result.task_id,
                "vote from unregistered contributor — no authority update"
            );
            continue;
        };
        if !contributor.active {
            warn!(
                contributor_id = %entry.contributor_id,
                task_id = %result.task_id,
                "vote from deactivated contributor — no authority update"
            );
            continue;
        }

        let (observed_quality, delta_reason) = judge_vote(result, entry, tolerance);
        let new_track_record =
            update_track_record(contributor, observed_quality, config.authority.lambda)?;
        let (recent_window, recent_performance) =
            update_recent_performance(contributor, observed_quality)?;

        let event = AuthorityUpdateEvent {
            contributor_id: contributor.id.clone(),
            task_id: result.task_id.clone(),
            old_track_record: contributor.track_record_score,
            new_track_record,
            delta_reason,
        };

        let mut updated = contributor.clone();
        updated.track_record_score = new_track_record;
        updated.recent_window = recent_window;
        updated.recent_performance_score = recent_performance;

        outcomes.push(UpdateOutcome {
            contributor: updated,
            event,
        });
    }

    info!(
        task_id = %result.task_id,
        updates = outcomes.len(),
        "authority updates computed"
    );
    Ok(outcomes)
}

/// Observed quality for one vote against the finalized outcome.
fn judge_vote(
    result: &FinalizedResult,
    entry: &FeedbackEntry,
    tolerance: f64,
) -> (f64, TrackRecordDelta) {
    match result.status {
        AggregationStatus::Consensus => {
            let matched = result
                .consensus_value
                .as_ref()
                .is_some_and(|value| vote_matches(entry, value, tolerance));
            if matched {
                (1.0, TrackRecordDelta::MatchedConsensus)
            } else {
                (0.0, TrackRecordDelta::DivergedFromConsensus)
            }
        }
        AggregationStatus::Uncertain => {
            let within = result
                .preserved_variants
                .iter()
                .any(|variant| vote_matches(entry, &variant.value, tolerance));
            if within {
                (1.0, TrackRecordDelta::WithinPreservedVariants)
            } else {
                (0.0, TrackRecordDelta::DivergedFromConsensus)
            }
        }
        // Unreachable: apply_round rejects other statuses up front.
        _ => (0.0, TrackRecordDelta::DivergedFromConsensus),
    }
}

fn vote_matches(entry: &FeedbackEntry, value: &ConsensusValue, tolerance: f64) -> bool {
    match value {
        ConsensusValue::Categorical(label) => entry.judgment.choice.as_deref() == Some(label.as_str()),
        ConsensusValue::Numeric(v) => entry
            .judgment
            .rating
            .is_some_and(|rating| (rating - v).abs() <= tolerance),
    }
}

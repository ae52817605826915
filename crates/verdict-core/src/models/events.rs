//! Authority update events — the append-only audit trail.

use serde::{Deserialize, Serialize};

use super::contributor::ContributorId;
use super::feedback::TaskId;

/// Why a track record moved. Closed set so the audit trail stays queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackRecordDelta {
    /// Vote matched the consensus value.
    MatchedConsensus,
    /// Vote fell within the preserved variants of an uncertain round.
    WithinPreservedVariants,
    /// Vote diverged from the finalized outcome.
    DivergedFromConsensus,
}

/// One track-record change for one (contributor, finalized task) pair.
/// That pair is the idempotence key: the caller's persistence layer must
/// treat a second event for the same pair as a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityUpdateEvent {
    pub contributor_id: ContributorId,
    pub task_id: TaskId,
    pub old_track_record: f64,
    pub new_track_record: f64,
    pub delta_reason: TrackRecordDelta,
}

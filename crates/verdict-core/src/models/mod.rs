//! Data model for the Verdict engine.
//!
//! Everything here is pure serde-serializable data. Durable state lives in
//! the caller; these types only express the contracts between components.

pub mod aggregation;
pub mod bias;
pub mod contributor;
pub mod controversy;
pub mod events;
pub mod feedback;

pub use aggregation::{
    AggregationResult, AggregationStatus, ConsensusValue, FinalizedResult, PreservedVariant, RatingSummary,
};
pub use bias::{BiasReport, SeverityTier};
pub use contributor::{Contributor, ContributorId, ContributorProfile, RecentWindow, RECENT_WINDOW_LEN};
pub use controversy::ControversyFlag;
pub use events::{AuthorityUpdateEvent, TrackRecordDelta};
pub use feedback::{latest_per_contributor, FeedbackEntry, StructuredJudgment, TaskId};

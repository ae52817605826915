//! # verdict-core
//!
//! Foundation crate for the Verdict aggregation engine.
//! Defines the data model, errors, configuration, shared collections,
//! and tracing setup. The engine crate depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{AuthorityConfig, BiasConfig, ControversyConfig, EngineConfig, PolicyTable, TaskPolicy, UpdaterConfig};
pub use errors::error_code::VerdictErrorCode;
pub use errors::{ConfigError, VerdictError, VerdictResult};
pub use models::aggregation::{
    AggregationResult, AggregationStatus, ConsensusValue, FinalizedResult, PreservedVariant, RatingSummary,
};
pub use models::bias::{BiasReport, SeverityTier};
pub use models::contributor::{Contributor, ContributorId, ContributorProfile};
pub use models::controversy::ControversyFlag;
pub use models::events::{AuthorityUpdateEvent, TrackRecordDelta};
pub use models::feedback::{FeedbackEntry, StructuredJudgment, TaskId};
pub use types::collections::{FxHashMap, FxHashSet};

//! Aggregation results — the primary output of the engine.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use super::feedback::TaskId;

/// A consensus value: either a categorical verdict or a numeric rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConsensusValue {
    Categorical(String),
    Numeric(f64),
}

impl fmt::Display for ConsensusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical(label) => write!(f, "{label}"),
            Self::Numeric(value) => write!(f, "{value}"),
        }
    }
}

/// Lifecycle status of an aggregation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationStatus {
    /// Quorum not met — an expected, non-exceptional outcome.
    InsufficientQuorum,
    /// Disagreement below the uncertainty threshold; one answer stands.
    Consensus,
    /// Genuine disagreement — multiple variants preserved, none collapsed.
    Uncertain,
    /// A confident consensus that contradicts the official baseline.
    Controversial,
}

impl fmt::Display for AggregationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientQuorum => write!(f, "insufficient_quorum"),
            Self::Consensus => write!(f, "consensus"),
            Self::Uncertain => write!(f, "uncertain"),
            Self::Controversial => write!(f, "controversial"),
        }
    }
}

/// One retained variant of an uncertain outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreservedVariant {
    pub value: ConsensusValue,
    pub weighted_probability: f64,
}

/// Weighted descriptive statistics for one numeric rating dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Authority-weighted mean.
    pub mean: f64,
    /// Authority-weighted variance.
    pub variance: f64,
    /// Number of effective votes carrying this dimension.
    pub sample_count: usize,
}

/// The outcome of aggregating one round of feedback for one task.
///
/// Created once quorum is met (or as an `InsufficientQuorum` report when it
/// is not). Finalization is the one-way transition into [`FinalizedResult`];
/// corrections require a new round, not an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub task_id: TaskId,
    pub status: AggregationStatus,
    /// Absent for `InsufficientQuorum` and for `Uncertain` outcomes, which
    /// preserve variants instead of collapsing to one answer.
    pub consensus_value: Option<ConsensusValue>,
    /// Shannon entropy of the weighted category distribution, in bits.
    /// Always within [0, log2(k)] for k observed categories.
    pub entropy_bits: f64,
    /// Top categories whose cumulative probability reaches 0.9, ordered by
    /// descending probability. Empty unless status is `Uncertain`.
    pub preserved_variants: Vec<PreservedVariant>,
    /// Effective (deduplicated) vote count.
    pub feedback_count: usize,
    /// Total authority mass behind the effective votes.
    pub authority_mass: f64,
    /// Summary of the overall numeric rating, when any vote carried one.
    pub overall_rating: Option<RatingSummary>,
    /// Per-aspect rating summaries, keyed by aspect name.
    pub aspect_summaries: BTreeMap<String, RatingSummary>,
    /// Free-text notes attached verbatim, ordered by submission time.
    pub notes: Vec<String>,
}

impl AggregationResult {
    /// The short-circuit result returned when the quorum gate says no.
    pub fn insufficient_quorum(task_id: TaskId, feedback_count: usize, authority_mass: f64) -> Self {
        Self {
            task_id,
            status: AggregationStatus::InsufficientQuorum,
            consensus_value: None,
            entropy_bits: 0.0,
            preserved_variants: Vec::new(),
            feedback_count,
            authority_mass,
            overall_rating: None,
            aspect_summaries: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    /// xxh3 fingerprint over the canonical field encoding. Two results are
    /// byte-identical for replay purposes iff their hashes match; used by
    /// audit tooling and the determinism tests.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hash_str(&mut hasher, self.task_id.as_str());
        hasher.update(&[self.status as u8]);
        hash_opt_value(&mut hasher, self.consensus_value.as_ref());
        hasher.update(&self.entropy_bits.to_bits().to_le_bytes());
        hasher.update(&(self.preserved_variants.len() as u64).to_le_bytes());
        for variant in &self.preserved_variants {
            hash_value(&mut hasher, &variant.value);
            hasher.update(&variant.weighted_probability.to_bits().to_le_bytes());
        }
        hasher.update(&(self.feedback_count as u64).to_le_bytes());
        hasher.update(&self.authority_mass.to_bits().to_le_bytes());
        hash_opt_summary(&mut hasher, self.overall_rating.as_ref());
        hasher.update(&(self.aspect_summaries.len() as u64).to_le_bytes());
        for (name, summary) in &self.aspect_summaries {
            hash_str(&mut hasher, name);
            hash_opt_summary(&mut hasher, Some(summary));
        }
        hasher.update(&(self.notes.len() as u64).to_le_bytes());
        for note in &self.notes {
            hash_str(&mut hasher, note);
        }
        hasher.digest()
    }

    /// The one-way transition. Consumes the mutable result; there is no path
    /// back. Exactly-once commitment per task is the caller's lock to hold.
    pub fn finalize(self) -> FinalizedResult {
        FinalizedResult(self)
    }
}

/// A sealed aggregation result. Read-only by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FinalizedResult(AggregationResult);

impl Deref for FinalizedResult {
    type Target = AggregationResult;

    fn deref(&self) -> &AggregationResult {
        &self.0
    }
}

impl FinalizedResult {
    pub fn as_result(&self) -> &AggregationResult {
        &self.0
    }
}

fn hash_str(hasher: &mut Xxh3, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn hash_value(hasher: &mut Xxh3, value: &ConsensusValue) {
    match value {
        ConsensusValue::Categorical(label) => {
            hasher.update(&[1u8]);
            hash_str(hasher, label);
        }
        ConsensusValue::Numeric(v) => {
            hasher.update(&[2u8]);
            hasher.update(&v.to_bits().to_le_bytes());
        }
    }
}

fn hash_opt_value(hasher: &mut Xxh3, value: Option<&ConsensusValue>) {
    match value {
        None => hasher.update(&[0u8]),
        Some(v) => hash_value(hasher, v),
    }
}

fn hash_opt_summary(hasher: &mut Xxh3, summary: Option<&RatingSummary>) {
    match summary {
        None => hasher.update(&[0u8]),
        Some(s) => {
            hasher.update(&[1u8]);
            hasher.update(&s.mean.to_bits().to_le_bytes());
            hasher.update(&s.variance.to_bits().to_le_bytes());
            hasher.update(&(s.sample_count as u64).to_le_bytes());
        }
    }
}

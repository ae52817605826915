//! Feedback entries — the immutable input stream of expert judgments.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contributor::ContributorId;
use crate::types::collections::FxHashMap;

/// Stable identifier for a review task (one AI-generated analysis).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The structured portion of a judgment: a categorical verdict and/or
/// numeric ratings. At least one of `choice` / `rating` is expected; the
/// aggregation engine tolerates either being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredJudgment {
    /// Categorical verdict, e.g. "valid" / "invalid" / "needs_revision".
    pub choice: Option<String>,
    /// Overall numeric rating in [0, 1].
    pub rating: Option<f64>,
    /// Named aspect ratings in [0, 1] (e.g. "accuracy", "citation_quality").
    pub aspects: BTreeMap<String, f64>,
}

impl StructuredJudgment {
    pub fn categorical(choice: impl Into<String>) -> Self {
        Self {
            choice: Some(choice.into()),
            ..Self::default()
        }
    }

    pub fn numeric(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Self::default()
        }
    }

    pub fn with_aspect(mut self, name: impl Into<String>, score: f64) -> Self {
        self.aspects.insert(name.into(), score);
        self
    }
}

/// One expert's judgment on one task. Created once by the external
/// submission path, read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub contributor_id: ContributorId,
    pub task_id: TaskId,
    pub entity_type: String,
    pub judgment: StructuredJudgment,
    /// Free-text note for qualitative review. Attached verbatim to the
    /// aggregation result; never influences consensus or entropy.
    pub note: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Deduplicate to the effective vote set: the latest entry per contributor
/// wins (the submission path timestamps entries strictly increasing per
/// contributor, so an exact timestamp tie keeps the first seen).
///
/// Output order is deterministic — by submission time, then contributor id —
/// regardless of input order.
pub fn latest_per_contributor(entries: &[FeedbackEntry]) -> Vec<&FeedbackEntry> {
    let mut latest: FxHashMap<&ContributorId, &FeedbackEntry> = FxHashMap::default();
    for entry in entries {
        match latest.get(&entry.contributor_id) {
            Some(current) if entry.submitted_at <= current.submitted_at => {}
            _ => {
                latest.insert(&entry.contributor_id, entry);
            }
        }
    }
    let mut effective: Vec<&FeedbackEntry> = latest.into_values().collect();
    effective.sort_by(|a, b| {
        a.submitted_at
            .cmp(&b.submitted_at)
            .then_with(|| a.contributor_id.cmp(&b.contributor_id))
    });
    effective
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(contributor: &str, minute: u32, choice: &str) -> FeedbackEntry {
        FeedbackEntry {
            contributor_id: contributor.into(),
            task_id: "task-1".into(),
            entity_type: "legal_analysis".into(),
            judgment: StructuredJudgment::categorical(choice),
            note: None,
            submitted_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn latest_entry_wins_per_contributor() {
        let entries = vec![
            entry("a", 0, "valid"),
            entry("a", 5, "invalid"),
            entry("b", 2, "valid"),
        ];
        let effective = latest_per_contributor(&entries);
        assert_eq!(effective.len(), 2);
        let a = effective
            .iter()
            .find(|e| e.contributor_id == "a".into())
            .unwrap();
        assert_eq!(a.judgment.choice.as_deref(), Some("invalid"));
    }

    #[test]
    fn output_order_is_input_order_independent() {
        let mut entries = vec![
            entry("c", 3, "valid"),
            entry("a", 1, "valid"),
            entry("b", 2, "invalid"),
        ];
        let forward: Vec<String> = latest_per_contributor(&entries)
            .iter()
            .map(|e| e.contributor_id.to_string())
            .collect();
        entries.reverse();
        let backward: Vec<String> = latest_per_contributor(&entries)
            .iter()
            .map(|e| e.contributor_id.to_string())
            .collect();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec!["a", "b", "c"]);
    }
}

//! Shared, read-only input for bias dimension strategies.

use verdict_core::models::latest_per_contributor;
use verdict_core::{
    AggregationResult, BiasConfig, ConsensusValue, Contributor, ContributorId, ContributorProfile,
    FeedbackEntry, FxHashMap,
};

/// Everything a dimension strategy may look at, borrowed for the call.
/// Construction deduplicates entries to the effective vote set, so every
/// strategy sees exactly one vote per contributor in a deterministic order
/// (submission time, then contributor id).
pub struct BiasContext<'a> {
    /// What is being analyzed — a task id or a named batch scope.
    pub scope: String,
    /// Effective votes, deduplicated and deterministically ordered.
    pub entries: Vec<&'a FeedbackEntry>,
    /// Contributor registry keyed by id.
    pub contributors: FxHashMap<&'a ContributorId, &'a Contributor>,
    /// Authority weights for the round.
    pub weights: &'a FxHashMap<ContributorId, f64>,
    /// The aggregation outcome the votes produced.
    pub result: &'a AggregationResult,
    /// Official baseline value, when one exists.
    pub baseline: Option<&'a ConsensusValue>,
    pub config: &'a BiasConfig,
}

impl<'a> BiasContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn for_round(
        scope: impl Into<String>,
        entries: &'a [FeedbackEntry],
        contributors: &'a [Contributor],
        weights: &'a FxHashMap<ContributorId, f64>,
        result: &'a AggregationResult,
        baseline: Option<&'a ConsensusValue>,
        config: &'a BiasConfig,
    ) -> Self {
        Self {
            scope: scope.into(),
            entries: latest_per_contributor(entries),
            contributors: contributors.iter().map(|c| (&c.id, c)).collect(),
            weights,
            result,
            baseline,
            config,
        }
    }

    pub fn weight_of(&self, id: &ContributorId) -> f64 {
        self.weights.get(id).copied().unwrap_or(0.0)
    }

    pub fn profile_of(&self, id: &ContributorId) -> Option<&ContributorProfile> {
        self.contributors.get(id).map(|c| &c.profile)
    }
}

/// Number of bands a numeric rating is bucketed into when a vote has no
/// categorical choice.
const RATING_BANDS: f64 = 5.0;

/// Reduce a vote to a comparable direction label: the categorical choice
/// when present, otherwise the rating bucketed into five bands.
pub fn vote_direction(entry: &FeedbackEntry) -> Option<String> {
    if let Some(choice) = &entry.judgment.choice {
        return Some(choice.clone());
    }
    entry.judgment.rating.map(|rating| {
        let band = ((rating.clamp(0.0, 1.0) * RATING_BANDS).floor() as usize).min(4);
        format!("band_{band}")
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use verdict_core::{StructuredJudgment, TaskId};

    use super::*;

    fn entry(judgment: StructuredJudgment) -> FeedbackEntry {
        FeedbackEntry {
            contributor_id: "a".into(),
            task_id: TaskId::from("task-1"),
            entity_type: "legal_analysis".into(),
            judgment,
            note: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn choice_beats_rating_as_direction() {
        let e = entry(StructuredJudgment {
            choice: Some("valid".into()),
            rating: Some(0.1),
            ..StructuredJudgment::default()
        });
        assert_eq!(vote_direction(&e).as_deref(), Some("valid"));
    }

    #[test]
    fn ratings_bucket_into_five_bands() {
        assert_eq!(vote_direction(&entry(StructuredJudgment::numeric(0.0))).as_deref(), Some("band_0"));
        assert_eq!(vote_direction(&entry(StructuredJudgment::numeric(0.55))).as_deref(), Some("band_2"));
        assert_eq!(vote_direction(&entry(StructuredJudgment::numeric(1.0))).as_deref(), Some("band_4"));
    }

    #[test]
    fn aspect_only_votes_have_no_direction() {
        let e = entry(StructuredJudgment::default().with_aspect("accuracy", 0.8));
        assert_eq!(vote_direction(&e), None);
    }
}

//! The `aggregate` operation: weighted consensus over one round of feedback.
//!
//! Referentially transparent by contract: identical inputs (in any entry
//! order) produce bit-identical results, so redundant invocations under a
//! finalization race are harmless and audit replay is exact.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use verdict_core::errors::ensure_finite;
use verdict_core::models::latest_per_contributor;
use verdict_core::{
    AggregationResult, AggregationStatus, ConsensusValue, ContributorId, FeedbackEntry, FxHashMap,
    PreservedVariant, RatingSummary, TaskId, TaskPolicy, VerdictError, VerdictResult,
};

use super::entropy::shannon_entropy_bits;
use super::numeric::weighted_summary;
use crate::quorum::QuorumDecision;

/// Cumulative probability the preserved variants of an uncertain round must
/// cover.
const PRESERVED_CUMULATIVE_PROBABILITY: f64 = 0.9;

/// Per-category accumulation over the effective votes.
struct CategoryStat {
    name: String,
    mass: f64,
    probability: f64,
    /// Earliest submission among this category's voters — the final
    /// tie-breaking criterion.
    earliest_vote: DateTime<Utc>,
}

/// Aggregate one round of feedback into a consensus-or-uncertainty result.
///
/// Short-circuits to an `InsufficientQuorum` result when the gate said no;
/// zero entries are an `InsufficientData` error instead (callers holding an
/// empty round have nothing meaningful to ask about).
pub fn aggregate(
    task_id: &TaskId,
    entries: &[FeedbackEntry],
    authority_weights: &FxHashMap<ContributorId, f64>,
    policy: &TaskPolicy,
    quorum: &QuorumDecision,
) -> VerdictResult<AggregationResult> {
    if entries.is_empty() {
        return Err(VerdictError::InsufficientData {
            task_id: task_id.clone(),
        });
    }
    if !quorum.met {
        debug!(task_id = %task_id, count = quorum.count, "quorum not met, short-circuiting");
        return Ok(AggregationResult::insufficient_quorum(
            task_id.clone(),
            quorum.count,
            quorum.authority_mass,
        ));
    }

    let effective = latest_per_contributor(entries);
    let weight_of = |entry: &FeedbackEntry| -> f64 {
        authority_weights
            .get(&entry.contributor_id)
            .copied()
            .unwrap_or(0.0)
    };

    // Free-text notes ride along verbatim, in submission order. They never
    // touch the consensus math.
    let notes: Vec<String> = effective
        .iter()
        .filter_map(|entry| entry.note.clone())
        .collect();

    let overall_rating = summarize_overall(task_id, &effective, &weight_of)?;
    let aspect_summaries = summarize_aspects(task_id, &effective, &weight_of)?;

    let mut stats = categorical_stats(task_id, &effective, &weight_of)?;

    if stats.is_empty() {
        return finish_numeric_round(
            task_id,
            quorum,
            overall_rating,
            aspect_summaries,
            notes,
        );
    }

    // Total ordering: probability desc, mass desc (redundant with
    // probability, kept for the policy's stated tie chain), earliest vote
    // asc, then name — so the sort is deterministic for any input order.
    stats.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.mass.partial_cmp(&a.mass).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.earliest_vote.cmp(&b.earliest_vote))
            .then_with(|| a.name.cmp(&b.name))
    });

    let entropy_bits = ensure_finite(
        shannon_entropy_bits(stats.iter().map(|s| s.probability)),
        "entropy",
        task_id.as_str(),
    )?;

    let (status, consensus_value, preserved_variants) = if entropy_bits < policy.uncertainty_threshold
    {
        let winner = ConsensusValue::Categorical(stats[0].name.clone());
        (AggregationStatus::Consensus, Some(winner), Vec::new())
    } else {
        // Preserve every variant until cumulative probability reaches the
        // coverage target — genuine disagreement is never collapsed away.
        let mut variants = Vec::new();
        let mut cumulative = 0.0;
        for stat in &stats {
            variants.push(PreservedVariant {
                value: ConsensusValue::Categorical(stat.name.clone()),
                weighted_probability: stat.probability,
            });
            cumulative += stat.probability;
            if cumulative >= PRESERVED_CUMULATIVE_PROBABILITY {
                break;
            }
        }
        (AggregationStatus::Uncertain, None, variants)
    };

    info!(
        task_id = %task_id,
        status = %status,
        entropy_bits,
        categories = stats.len(),
        "aggregation complete"
    );

    Ok(AggregationResult {
        task_id: task_id.clone(),
        status,
        consensus_value,
        entropy_bits,
        preserved_variants,
        feedback_count: quorum.count,
        authority_mass: quorum.authority_mass,
        overall_rating,
        aspect_summaries,
        notes,
    })
}

fn categorical_stats(
    task_id: &TaskId,
    effective: &[&FeedbackEntry],
    weight_of: &impl Fn(&FeedbackEntry) -> f64,
) -> VerdictResult<Vec<CategoryStat>> {
    struct Accum {
        mass: f64,
        earliest_vote: DateTime<Utc>,
    }

    let mut accums: FxHashMap<&str, Accum> = FxHashMap::default();
    for &entry in effective {
        let Some(choice) = entry.judgment.choice.as_deref() else {
            continue;
        };
        let weight = weight_of(entry);
        match accums.get_mut(choice) {
            Some(accum) => {
                accum.mass += weight;
                if entry.submitted_at < accum.earliest_vote {
                    accum.earliest_vote = entry.submitted_at;
                }
            }
            None => {
                accums.insert(
                    choice,
                    Accum {
                        mass: weight,
                        earliest_vote: entry.submitted_at,
                    },
                );
            }
        }
    }

    if accums.is_empty() {
        return Ok(Vec::new());
    }

    let total_mass: f64 = accums.values().map(|a| a.mass).sum();
    let total_mass = ensure_finite(total_mass, "total authority mass", task_id.as_str())?;
    if total_mass <= 0.0 {
        return Err(VerdictError::NumericIntegrity {
            quantity: "total authority mass",
            context: format!("task {task_id}: all categorical votes carry zero weight"),
        });
    }

    let mut stats = Vec::with_capacity(accums.len());
    for (name, accum) in accums {
        let probability = ensure_finite(accum.mass / total_mass, "category probability", name)?;
        stats.push(CategoryStat {
            name: name.to_string(),
            mass: accum.mass,
            probability,
            earliest_vote: accum.earliest_vote,
        });
    }
    Ok(stats)
}

fn summarize_overall(
    task_id: &TaskId,
    effective: &[&FeedbackEntry],
    weight_of: &impl Fn(&FeedbackEntry) -> f64,
) -> VerdictResult<Option<RatingSummary>> {
    let samples: Vec<(f64, f64)> = effective
        .iter()
        .filter_map(|&entry| entry.judgment.rating.map(|r| (r, weight_of(entry))))
        .collect();
    check_summary(weighted_summary(&samples), "overall rating", task_id)
}

fn summarize_aspects(
    task_id: &TaskId,
    effective: &[&FeedbackEntry],
    weight_of: &impl Fn(&FeedbackEntry) -> f64,
) -> VerdictResult<BTreeMap<String, RatingSummary>> {
    let mut samples_by_aspect: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for &entry in effective {
        let weight = weight_of(entry);
        for (aspect, score) in &entry.judgment.aspects {
            samples_by_aspect
                .entry(aspect.as_str())
                .or_default()
                .push((*score, weight));
        }
    }

    let mut summaries = BTreeMap::new();
    for (aspect, samples) in samples_by_aspect {
        if let Some(summary) = check_summary(weighted_summary(&samples), "aspect rating", task_id)? {
            summaries.insert(aspect.to_string(), summary);
        }
    }
    Ok(summaries)
}

fn check_summary(
    summary: Option<RatingSummary>,
    quantity: &'static str,
    task_id: &TaskId,
) -> VerdictResult<Option<RatingSummary>> {
    match summary {
        Some(s) => {
            ensure_finite(s.mean, quantity, task_id.as_str())?;
            ensure_finite(s.variance, quantity, task_id.as_str())?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

fn finish_numeric_round(
    task_id: &TaskId,
    quorum: &QuorumDecision,
    overall_rating: Option<RatingSummary>,
    aspect_summaries: BTreeMap<String, RatingSummary>,
    notes: Vec<String>,
) -> VerdictResult<AggregationResult> {
    // No categorical votes at all. The consensus is the weighted mean of the
    // overall rating; a round with neither choices nor ratings carries no
    // structured signal to aggregate.
    let Some(summary) = overall_rating else {
        return Err(VerdictError::InsufficientData {
            task_id: task_id.clone(),
        });
    };

    info!(
        task_id = %task_id,
        status = %AggregationStatus::Consensus,
        mean = summary.mean,
        "numeric-only aggregation complete"
    );

    Ok(AggregationResult {
        task_id: task_id.clone(),
        status: AggregationStatus::Consensus,
        consensus_value: Some(ConsensusValue::Numeric(summary.mean)),
        entropy_bits: 0.0,
        preserved_variants: Vec::new(),
        feedback_count: quorum.count,
        authority_mass: quorum.authority_mass,
        overall_rating: Some(summary),
        aspect_summaries,
        notes,
    })
}

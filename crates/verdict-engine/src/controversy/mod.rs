//! Controversy detection: confident consensus vs. official baseline.

use tracing::info;
use verdict_core::{
    AggregationResult, AggregationStatus, ConsensusValue, ControversyConfig, ControversyFlag,
    TaskPolicy,
};

/// Compare a round's outcome against an official baseline value.
///
/// Only a *confident* community consensus that contradicts the baseline is
/// controversial. An uncertain round that happens to lean away from the
/// baseline is noise and is never flagged, whatever its divergence.
pub fn detect(
    result: &AggregationResult,
    official_value: Option<&ConsensusValue>,
    policy: &TaskPolicy,
    config: &ControversyConfig,
) -> ControversyFlag {
    let Some(official) = official_value else {
        return ControversyFlag::unflagged(result.task_id.clone());
    };
    let Some(consensus) = result.consensus_value.as_ref() else {
        // Nothing confident to diverge from the baseline.
        return ControversyFlag::unflagged(result.task_id.clone());
    };

    let divergence_score = divergence(consensus, official, config.expected_range);
    let is_controversial = divergence_score > policy.divergence_threshold
        && result.status == AggregationStatus::Consensus;

    if is_controversial {
        info!(
            task_id = %result.task_id,
            divergence_score,
            threshold = policy.divergence_threshold,
            "confident consensus contradicts official baseline"
        );
    }

    ControversyFlag {
        task_id: result.task_id.clone(),
        is_controversial,
        divergence_score,
    }
}

/// Divergence between consensus and official value, in [0, 1].
fn divergence(consensus: &ConsensusValue, official: &ConsensusValue, expected_range: f64) -> f64 {
    match (consensus, official) {
        (ConsensusValue::Categorical(a), ConsensusValue::Categorical(b)) => {
            if a == b {
                0.0
            } else {
                1.0
            }
        }
        (ConsensusValue::Numeric(a), ConsensusValue::Numeric(b)) => {
            ((a - b).abs() / expected_range).clamp(0.0, 1.0)
        }
        // A categorical verdict against a numeric baseline (or vice versa)
        // cannot agree.
        _ => 1.0,
    }
}

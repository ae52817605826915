//! Round orchestration: the forward pipeline for one task.
//!
//! Tracker → Quorum Gate → Aggregation Engine → {Controversy Detector,
//! Bias Analyzer} → Authority Updater. Everything is computed pure; the
//! caller commits the finalized round under its own per-task lock so exactly
//! one outcome is durable even when submissions race.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use verdict_core::models::{BiasReport, ControversyFlag};
use verdict_core::{
    AggregationStatus, ConsensusValue, Contributor, EngineConfig, FeedbackEntry, FinalizedResult,
    TaskId, VerdictResult,
};

use crate::aggregation::aggregate;
use crate::authority::authority_table;
use crate::bias::{BiasAnalyzer, BiasContext};
use crate::controversy::detect;
use crate::quorum::{self, QuorumDecision};
use crate::updater::{apply_round, UpdateOutcome};

/// What the retrieval/reasoning pipeline hands over once an AI answer
/// exists and review begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub task_id: TaskId,
    pub entity_type: String,
    /// Official baseline value, when ground truth exists for this task.
    pub official_value: Option<ConsensusValue>,
}

/// A fully processed round, ready for the caller to commit.
#[derive(Debug)]
pub struct FinalizedRound {
    pub result: FinalizedResult,
    pub controversy: ControversyFlag,
    pub bias: BiasReport,
    /// Empty for controversial rounds — a disputed verdict moves nobody's
    /// track record.
    pub updates: Vec<UpdateOutcome>,
}

/// Outcome of running the pipeline against the data collected so far.
#[derive(Debug)]
pub enum RoundOutcome {
    /// Quorum not met yet. No result exists; the scheduler keeps collecting
    /// (or gives up — that decision lives outside this core).
    Pending { quorum: QuorumDecision },
    Finalized(Box<FinalizedRound>),
}

/// Run the full forward pipeline for one task.
pub fn run_round(
    task: &TaskDescriptor,
    entries: &[FeedbackEntry],
    contributors: &[Contributor],
    config: &EngineConfig,
    analyzer: &BiasAnalyzer,
) -> VerdictResult<RoundOutcome> {
    let weights = authority_table(contributors, &config.authority)?;
    let policy = config.policies.policy_for(&task.entity_type)?;
    let quorum = quorum::evaluate(entries, &weights, policy);
    if !quorum.met {
        debug!(
            task_id = %task.task_id,
            count = quorum.count,
            authority_mass = quorum.authority_mass,
            "round pending quorum"
        );
        return Ok(RoundOutcome::Pending { quorum });
    }

    let mut result = aggregate(&task.task_id, entries, &weights, policy, &quorum)?;
    let controversy = detect(&result, task.official_value.as_ref(), policy, &config.controversy);
    if controversy.is_controversial {
        result.status = AggregationStatus::Controversial;
    }

    let ctx = BiasContext::for_round(
        task.task_id.to_string(),
        entries,
        contributors,
        &weights,
        &result,
        task.official_value.as_ref(),
        &config.bias,
    );
    let bias = analyzer.analyze(&ctx)?;

    let result = result.finalize();
    let updates = match result.status {
        AggregationStatus::Consensus | AggregationStatus::Uncertain => {
            apply_round(&result, entries, contributors, config)?
        }
        _ => Vec::new(),
    };

    info!(
        task_id = %task.task_id,
        status = %result.status,
        config_version = config.version,
        updates = updates.len(),
        "round finalized"
    );
    Ok(RoundOutcome::Finalized(Box::new(FinalizedRound {
        result,
        controversy,
        bias,
        updates,
    })))
}

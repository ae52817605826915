//! Controversy flags — derived, recomputable, not authoritative state.

use serde::{Deserialize, Serialize};

use super::feedback::TaskId;

/// Outcome of comparing a finalized consensus against an official baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControversyFlag {
    pub task_id: TaskId,
    /// True only for a *confident* consensus that contradicts the official
    /// baseline. Uncertain disagreement is noise, not controversy.
    pub is_controversial: bool,
    /// Divergence from the official value in [0, 1]. 0.0 when no official
    /// value was supplied.
    pub divergence_score: f64,
}

impl ControversyFlag {
    /// The flag for a round with no official baseline to compare against.
    pub fn unflagged(task_id: TaskId) -> Self {
        Self {
            task_id,
            is_controversial: false,
            divergence_score: 0.0,
        }
    }
}

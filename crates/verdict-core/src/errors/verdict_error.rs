use super::error_code::{self, VerdictErrorCode};
use super::ConfigError;
use crate::models::feedback::TaskId;

/// Top-level error type for the Verdict engine.
/// Subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// `aggregate` was called with zero feedback entries. Distinct from the
    /// `InsufficientQuorum` status, which is returned as data, not thrown.
    #[error("insufficient data: no feedback entries for task {task_id}")]
    InsufficientData { task_id: TaskId },

    /// A computed score came out NaN or infinite. The engine fails loudly
    /// rather than propagate corrupted values into downstream computations.
    #[error("numeric integrity violation: non-finite {quantity} ({context})")]
    NumericIntegrity {
        quantity: &'static str,
        context: String,
    },

    /// A component was invoked against a result in the wrong lifecycle state.
    #[error("invalid state: {reason}")]
    State { reason: String },
}

impl VerdictErrorCode for VerdictError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(inner) => inner.error_code(),
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::NumericIntegrity { .. } => error_code::NUMERIC_INTEGRITY,
            Self::State { .. } => error_code::STATE_ERROR,
        }
    }
}

/// Convenience type alias.
pub type VerdictResult<T> = Result<T, VerdictError>;

/// Guard helper: returns `NumericIntegrity` unless `value` is finite.
pub fn ensure_finite(value: f64, quantity: &'static str, context: &str) -> VerdictResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VerdictError::NumericIntegrity {
            quantity,
            context: context.to_string(),
        })
    }
}

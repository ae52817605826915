//! Configuration validation errors.

use super::error_code::{self, VerdictErrorCode};

/// Errors raised while validating or loading engine configuration.
/// All of these are fatal: surfaced immediately, never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("authority weights must sum to 1.0 within {tolerance}: alpha={alpha} beta={beta} gamma={gamma}")]
    WeightSumInvalid {
        alpha: f64,
        beta: f64,
        gamma: f64,
        tolerance: f64,
    },

    #[error("{field} out of range: {value} (expected [{min}, {max}])")]
    ValueOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown entity type {entity_type:?} and no default policy configured")]
    UnknownEntityType { entity_type: String },

    #[error("invalid policy for entity type {entity_type:?}: {reason}")]
    InvalidPolicy { entity_type: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl VerdictErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntityType { .. } => error_code::UNKNOWN_ENTITY_TYPE,
            _ => error_code::CONFIG_ERROR,
        }
    }
}

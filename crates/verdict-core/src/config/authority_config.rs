//! Authority formula weights.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Tolerance on the α+β+γ = 1 constraint.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights for `A = α·B + β·T + γ·P` plus the track-record smoothing factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Weight on the baseline credential score.
    pub alpha: f64,
    /// Weight on the track record score.
    pub beta: f64,
    /// Weight on the recent performance score.
    pub gamma: f64,
    /// Exponential smoothing factor for track-record updates:
    /// `T(t) = λ·T(t−1) + (1−λ)·Q(t)`.
    pub lambda: f64,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            beta: 0.4,
            gamma: 0.2,
            lambda: 0.95,
        }
    }
}

impl AuthorityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("authority.alpha", self.alpha),
            ("authority.beta", self.beta),
            ("authority.gamma", self.gamma),
            ("authority.lambda", self.lambda),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValueOutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        let sum = self.alpha + self.beta + self.gamma;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSumInvalid {
                alpha: self.alpha,
                beta: self.beta,
                gamma: self.gamma,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!(AuthorityConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_weight_sum_off_by_more_than_tolerance() {
        let config = AuthorityConfig {
            alpha: 0.4,
            beta: 0.4,
            gamma: 0.21,
            lambda: 0.95,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightSumInvalid { .. })
        ));
    }

    #[test]
    fn accepts_weight_sum_within_tolerance() {
        let config = AuthorityConfig {
            alpha: 0.4,
            beta: 0.4,
            gamma: 0.2 + 5e-7,
            lambda: 0.95,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_negative_lambda() {
        let config = AuthorityConfig {
            lambda: -0.1,
            ..AuthorityConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { field: "authority.lambda", .. })
        ));
    }
}

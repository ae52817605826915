//! Controversy detector configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControversyConfig {
    /// Expected range for numeric consensus values, used to normalize
    /// `|consensus − official|`. Ratings live on the unit interval, so 1.0.
    pub expected_range: f64,
}

impl Default for ControversyConfig {
    fn default() -> Self {
        Self { expected_range: 1.0 }
    }
}

impl ControversyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.expected_range.is_finite() || self.expected_range <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                field: "controversy.expected_range",
                value: self.expected_range,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        Ok(())
    }
}

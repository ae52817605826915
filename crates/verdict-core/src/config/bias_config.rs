//! Bias analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasConfig {
    /// Minimum members before an attribute group counts toward group-skew
    /// dimensions. Singleton "groups" are individual opinion, not bias.
    pub min_group_size: usize,
    /// How close a numeric vote must sit to the anchor vote (fraction of the
    /// unit interval) to count as anchored, for the cognitive dimension.
    pub numeric_anchor_tolerance: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            min_group_size: 2,
            numeric_anchor_tolerance: 0.1,
        }
    }
}

impl BiasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_group_size < 2 {
            return Err(ConfigError::ValueOutOfRange {
                field: "bias.min_group_size",
                value: self.min_group_size as f64,
                min: 2.0,
                max: f64::MAX,
            });
        }
        if !self.numeric_anchor_tolerance.is_finite()
            || !(0.0..=1.0).contains(&self.numeric_anchor_tolerance)
        {
            return Err(ConfigError::ValueOutOfRange {
                field: "bias.numeric_anchor_tolerance",
                value: self.numeric_anchor_tolerance,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

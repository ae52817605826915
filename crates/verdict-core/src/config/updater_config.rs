//! Authority updater configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// How close a numeric vote must sit to a numeric consensus (as a
    /// fraction of the expected range) to count as a match.
    pub numeric_match_tolerance: f64,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            numeric_match_tolerance: 0.1,
        }
    }
}

impl UpdaterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.numeric_match_tolerance.is_finite()
            || !(0.0..=1.0).contains(&self.numeric_match_tolerance)
        {
            return Err(ConfigError::ValueOutOfRange {
                field: "updater.numeric_match_tolerance",
                value: self.numeric_match_tolerance,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

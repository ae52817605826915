//! Engine configuration.
//!
//! Configuration is an explicit, versioned value constructed once per engine
//! instance and passed through function arguments — never read from ambient
//! state. Reconfiguration means building a new `EngineConfig` (bumping
//! `version`) and swapping it at a boundary the caller controls; in-flight
//! aggregations keep the value they were handed.

pub mod authority_config;
pub mod bias_config;
pub mod controversy_config;
pub mod policy_config;
pub mod updater_config;

use serde::{Deserialize, Serialize};

pub use authority_config::{AuthorityConfig, WEIGHT_SUM_TOLERANCE};
pub use bias_config::BiasConfig;
pub use controversy_config::ControversyConfig;
pub use policy_config::{PolicyTable, TaskPolicy};
pub use updater_config::UpdaterConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Monotonically increasing config generation. Bumped on every reload so
    /// results and logs can record which configuration produced them.
    pub version: u64,
    pub authority: AuthorityConfig,
    pub policies: PolicyTable,
    pub controversy: ControversyConfig,
    pub updater: UpdaterConfig,
    pub bias: BiasConfig,
}

impl EngineConfig {
    /// Load config from a TOML string, falling back to defaults for missing
    /// fields, then validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        tracing::debug!(version = config.version, "engine config loaded");
        Ok(config)
    }

    /// Validate every subsystem config. Called at construction boundaries;
    /// engine entry points may assume a validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.authority.validate()?;
        self.policies.validate()?;
        self.controversy.validate()?;
        self.updater.validate()?;
        self.bias.validate()?;
        Ok(())
    }

    /// A copy with the version bumped — the reload idiom.
    pub fn next_generation(&self) -> Self {
        let mut next = self.clone();
        next.version += 1;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn from_toml_applies_partial_overrides() {
        let config = EngineConfig::from_toml(
            r#"
            version = 3

            [authority]
            alpha = 0.5
            beta = 0.3
            gamma = 0.2

            [policies.entries.contract_clause]
            min_quorum_count = 5
            min_quorum_authority_mass = 2.0
            divergence_threshold = 0.25
            uncertainty_threshold = 0.8
            "#,
        )
        .expect("valid TOML config");
        assert_eq!(config.version, 3);
        assert_eq!(config.authority.alpha, 0.5);
        let policy = config.policies.policy_for("contract_clause").unwrap();
        assert_eq!(policy.min_quorum_count, 5);
        // Unspecified subsystems keep defaults.
        assert_eq!(config.updater, UpdaterConfig::default());
    }

    #[test]
    fn from_toml_rejects_bad_weights() {
        let err = EngineConfig::from_toml(
            r#"
            [authority]
            alpha = 0.9
            beta = 0.9
            gamma = 0.9
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::WeightSumInvalid { .. }));
    }

    #[test]
    fn next_generation_bumps_version_only() {
        let config = EngineConfig::default();
        let next = config.next_generation();
        assert_eq!(next.version, config.version + 1);
        assert_eq!(next.authority, config.authority);
    }
}

//! Per-entity-type quorum and threshold policies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Quorum and decision thresholds for one entity type. Immutable per round;
/// changes go through an explicit `PolicyTable` reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPolicy {
    /// Minimum number of effective (deduplicated) votes.
    pub min_quorum_count: usize,
    /// Minimum total authority mass behind those votes.
    pub min_quorum_authority_mass: f64,
    /// Divergence above which a confident consensus is controversial.
    pub divergence_threshold: f64,
    /// Entropy (bits) at or above which the round stays uncertain.
    pub uncertainty_threshold: f64,
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self {
            min_quorum_count: 3,
            min_quorum_authority_mass: 1.0,
            divergence_threshold: 0.3,
            uncertainty_threshold: 1.0,
        }
    }
}

impl TaskPolicy {
    fn validate(&self, entity_type: &str) -> Result<(), ConfigError> {
        if self.min_quorum_count == 0 {
            return Err(ConfigError::InvalidPolicy {
                entity_type: entity_type.to_string(),
                reason: "min_quorum_count must be at least 1".to_string(),
            });
        }
        if !self.min_quorum_authority_mass.is_finite() || self.min_quorum_authority_mass < 0.0 {
            return Err(ConfigError::InvalidPolicy {
                entity_type: entity_type.to_string(),
                reason: format!(
                    "min_quorum_authority_mass must be finite and non-negative, got {}",
                    self.min_quorum_authority_mass
                ),
            });
        }
        if !self.divergence_threshold.is_finite() || !(0.0..=1.0).contains(&self.divergence_threshold) {
            return Err(ConfigError::InvalidPolicy {
                entity_type: entity_type.to_string(),
                reason: format!(
                    "divergence_threshold must be within [0, 1], got {}",
                    self.divergence_threshold
                ),
            });
        }
        if !self.uncertainty_threshold.is_finite() || self.uncertainty_threshold < 0.0 {
            return Err(ConfigError::InvalidPolicy {
                entity_type: entity_type.to_string(),
                reason: format!(
                    "uncertainty_threshold must be finite and non-negative, got {}",
                    self.uncertainty_threshold
                ),
            });
        }
        Ok(())
    }
}

/// The per-entity-type policy table, with an optional fallback for entity
/// types not listed explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTable {
    /// entity_type → policy. BTreeMap so serialized tables diff cleanly.
    pub entries: BTreeMap<String, TaskPolicy>,
    /// Fallback policy for unlisted entity types. `None` makes unlisted
    /// entity types a hard `ConfigError`.
    pub default_policy: Option<TaskPolicy>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::with_default(TaskPolicy::default())
    }
}

impl PolicyTable {
    /// Table with a single catch-all default policy.
    pub fn with_default(default_policy: TaskPolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_policy: Some(default_policy),
        }
    }

    pub fn insert(&mut self, entity_type: impl Into<String>, policy: TaskPolicy) {
        self.entries.insert(entity_type.into(), policy);
    }

    /// Look up the policy governing an entity type.
    pub fn policy_for(&self, entity_type: &str) -> Result<&TaskPolicy, ConfigError> {
        self.entries
            .get(entity_type)
            .or(self.default_policy.as_ref())
            .ok_or_else(|| ConfigError::UnknownEntityType {
                entity_type: entity_type.to_string(),
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (entity_type, policy) in &self.entries {
            policy.validate(entity_type)?;
        }
        if let Some(default_policy) = &self.default_policy {
            default_policy.validate("(default)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_entry_beats_default() {
        let mut table = PolicyTable::with_default(TaskPolicy::default());
        table.insert(
            "statute_citation",
            TaskPolicy {
                min_quorum_count: 7,
                ..TaskPolicy::default()
            },
        );
        assert_eq!(table.policy_for("statute_citation").unwrap().min_quorum_count, 7);
        assert_eq!(table.policy_for("anything_else").unwrap().min_quorum_count, 3);
    }

    #[test]
    fn unknown_entity_type_without_default_is_config_error() {
        let table = PolicyTable {
            entries: BTreeMap::new(),
            default_policy: None,
        };
        let err = table.policy_for("contract_clause").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEntityType { .. }));
    }

    #[test]
    fn zero_quorum_count_rejected() {
        let mut table = PolicyTable::default();
        table.insert(
            "contract_clause",
            TaskPolicy {
                min_quorum_count: 0,
                ..TaskPolicy::default()
            },
        );
        assert!(matches!(table.validate(), Err(ConfigError::InvalidPolicy { .. })));
    }
}

//! Bias reports and severity tiers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a combined bias magnitude, on half-open intervals:
/// [0, 0.2) Minimal, [0.2, 0.4) Low, [0.4, 0.6) Moderate, [0.6, 0.8) High,
/// [0.8, ·] Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl SeverityTier {
    /// Classify a combined bias magnitude. The RMS combination can exceed
    /// 1.0 with several saturated dimensions; anything past 0.8 is Critical.
    pub fn from_total_bias(total_bias: f64) -> Self {
        if total_bias < 0.2 {
            Self::Minimal
        } else if total_bias < 0.4 {
            Self::Low
        } else if total_bias < 0.6 {
            Self::Moderate
        } else if total_bias < 0.8 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Fixed recommended-action label for the surrounding application.
    pub fn recommended_action(&self) -> &'static str {
        match self {
            Self::Minimal => "no action required",
            Self::Low => "monitor in future rounds",
            Self::Moderate => "review panel composition before next round",
            Self::High => "rebalance panel and re-collect feedback",
            Self::Critical => "quarantine round pending manual audit",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Per-dimension bias scores for one scope (typically one task round),
/// combined into a single magnitude via the RMS norm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    /// What was analyzed — a task id or a named batch scope.
    pub scope: String,
    /// Dimension name → score in [0, 1]. BTreeMap so report order is stable.
    pub per_dimension_scores: BTreeMap<String, f64>,
    /// `sqrt(Σ score_d²)` over all computed dimensions. Unclamped.
    pub total_bias: f64,
    pub severity: SeverityTier,
}

impl BiasReport {
    /// The highest-scoring dimension, if any were computed.
    pub fn dominant_dimension(&self) -> Option<(&str, f64)> {
        self.per_dimension_scores
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, score)| (name.as_str(), *score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_half_open() {
        assert_eq!(SeverityTier::from_total_bias(0.0), SeverityTier::Minimal);
        assert_eq!(SeverityTier::from_total_bias(0.2), SeverityTier::Low);
        assert_eq!(SeverityTier::from_total_bias(0.399), SeverityTier::Low);
        assert_eq!(SeverityTier::from_total_bias(0.4), SeverityTier::Moderate);
        assert_eq!(SeverityTier::from_total_bias(0.6), SeverityTier::High);
        assert_eq!(SeverityTier::from_total_bias(0.8), SeverityTier::Critical);
        assert_eq!(SeverityTier::from_total_bias(1.0), SeverityTier::Critical);
        assert_eq!(SeverityTier::from_total_bias(2.2), SeverityTier::Critical);
    }

    #[test]
    fn dominant_dimension_picks_max() {
        let mut scores = BTreeMap::new();
        scores.insert("professional".to_string(), 0.7);
        scores.insert("temporal".to_string(), 0.2);
        let report = BiasReport {
            scope: "task-1".to_string(),
            per_dimension_scores: scores,
            total_bias: 0.73,
            severity: SeverityTier::from_total_bias(0.73),
        };
        assert_eq!(report.dominant_dimension(), Some(("professional", 0.7)));
    }
}

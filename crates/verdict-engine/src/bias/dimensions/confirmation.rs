//! Confirmation bias: the panel rubber-stamping the official baseline.

use verdict_core::{ConsensusValue, VerdictResult};

use super::BiasDimension;
use crate::bias::context::{vote_direction, BiasContext};

pub struct ConfirmationDimension;

impl BiasDimension for ConfirmationDimension {
    fn name(&self) -> &'static str {
        "confirmation"
    }

    /// Authority-weighted share of votes matching the official baseline,
    /// rescaled above the chance level of agreeing at random. 0.0 when no
    /// baseline exists — there is nothing to confirm.
    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64> {
        let Some(baseline) = ctx.baseline else {
            return Ok(0.0);
        };

        let mut total_mass = 0.0;
        let mut matching_mass = 0.0;
        let chance = match baseline {
            ConsensusValue::Categorical(label) => {
                let mut directions: Vec<String> = ctx
                    .entries
                    .iter()
                    .filter_map(|&entry| vote_direction(entry))
                    .collect();
                directions.sort();
                directions.dedup();
                if directions.is_empty() {
                    return Ok(0.0);
                }
                for &entry in &ctx.entries {
                    let Some(choice) = entry.judgment.choice.as_deref() else {
                        continue;
                    };
                    let weight = ctx.weight_of(&entry.contributor_id);
                    if weight <= 0.0 {
                        continue;
                    }
                    total_mass += weight;
                    if choice == label {
                        matching_mass += weight;
                    }
                }
                1.0 / directions.len() as f64
            }
            ConsensusValue::Numeric(value) => {
                let tolerance = ctx.config.numeric_anchor_tolerance;
                for &entry in &ctx.entries {
                    let Some(rating) = entry.judgment.rating else {
                        continue;
                    };
                    let weight = ctx.weight_of(&entry.contributor_id);
                    if weight <= 0.0 {
                        continue;
                    }
                    total_mass += weight;
                    if (rating - value).abs() <= tolerance {
                        matching_mass += weight;
                    }
                }
                (2.0 * ctx.config.numeric_anchor_tolerance).min(1.0)
            }
        };

        if total_mass <= 0.0 || chance >= 1.0 {
            return Ok(0.0);
        }
        let match_rate = matching_mass / total_mass;
        Ok(((match_rate - chance) / (1.0 - chance)).clamp(0.0, 1.0))
    }
}

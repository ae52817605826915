//! Temporal herding: late voters following the early majority.

use verdict_core::VerdictResult;

use super::{direction_distribution, BiasDimension};
use crate::bias::context::{vote_direction, BiasContext};

pub struct TemporalDimension;

impl BiasDimension for TemporalDimension {
    fn name(&self) -> &'static str {
        "temporal"
    }

    /// Split the round at its midpoint (entries arrive pre-sorted by
    /// submission time) and measure how much of the late half's authority
    /// mass lines up behind the early half's majority, rescaled above the
    /// panel-wide rate for that direction. A late half that merely mirrors
    /// the overall distribution scores zero — unanimity is consensus, not
    /// herding; only late voters over-following the early signal register.
    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64> {
        let n = ctx.entries.len();
        if n < 2 {
            return Ok(0.0);
        }
        let (early, late) = ctx.entries.split_at(n / 2);

        let Some((overall_dist, _)) = direction_distribution(ctx, &ctx.entries) else {
            return Ok(0.0);
        };
        let Some((early_dist, _)) = direction_distribution(ctx, early) else {
            return Ok(0.0);
        };
        // Majority by probability; BTreeMap order breaks exact ties by name.
        let Some(early_majority) = early_dist
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(direction, _)| direction.clone())
        else {
            return Ok(0.0);
        };
        let overall_rate = overall_dist.get(&early_majority).copied().unwrap_or(0.0);
        if overall_rate >= 1.0 {
            return Ok(0.0);
        }

        let mut late_mass = 0.0;
        let mut matching_mass = 0.0;
        for &entry in late {
            let Some(direction) = vote_direction(entry) else {
                continue;
            };
            let weight = ctx.weight_of(&entry.contributor_id);
            if weight <= 0.0 {
                continue;
            }
            late_mass += weight;
            if direction == early_majority {
                matching_mass += weight;
            }
        }
        if late_mass <= 0.0 {
            return Ok(0.0);
        }

        let match_rate = matching_mass / late_mass;
        Ok(((match_rate - overall_rate) / (1.0 - overall_rate)).clamp(0.0, 1.0))
    }
}

//! Cognitive anchoring: the panel converging on whoever spoke first.

use verdict_core::{FeedbackEntry, VerdictResult};

use super::BiasDimension;
use crate::bias::context::{vote_direction, BiasContext};

pub struct CognitiveDimension;

impl BiasDimension for CognitiveDimension {
    fn name(&self) -> &'static str {
        "cognitive"
    }

    /// The anchor is the earliest vote carrying a direction. Subsequent
    /// votes "anchor" when they repeat the anchor's choice (categorical) or
    /// land within the configured tolerance of its rating (numeric). The
    /// score is the authority-weighted anchored share rescaled above the
    /// chance level of agreeing at random.
    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64> {
        let Some(anchor_index) = ctx
            .entries
            .iter()
            .position(|&entry| vote_direction(entry).is_some())
        else {
            return Ok(0.0);
        };
        let anchor = ctx.entries[anchor_index];
        let followers = &ctx.entries[anchor_index + 1..];
        if followers.is_empty() {
            return Ok(0.0);
        }

        let (chance, rate) = if let Some(anchor_choice) = anchor.judgment.choice.as_deref() {
            let chance = 1.0 / distinct_direction_count(&ctx.entries) as f64;
            let rate = anchored_rate(ctx, followers, |entry| {
                entry.judgment.choice.as_deref().map(|c| c == anchor_choice)
            });
            (chance, rate)
        } else if let Some(anchor_rating) = anchor.judgment.rating {
            let tolerance = ctx.config.numeric_anchor_tolerance;
            let chance = (2.0 * tolerance).min(1.0);
            let rate = anchored_rate(ctx, followers, |entry| {
                entry.judgment.rating.map(|r| (r - anchor_rating).abs() <= tolerance)
            });
            (chance, rate)
        } else {
            return Ok(0.0);
        };

        let (Some(rate), true) = (rate, chance < 1.0) else {
            return Ok(0.0);
        };
        Ok(((rate - chance) / (1.0 - chance)).clamp(0.0, 1.0))
    }
}

/// Authority-weighted share of followers that anchored. `None` when no
/// follower carries both the relevant signal and positive weight.
fn anchored_rate(
    ctx: &BiasContext<'_>,
    followers: &[&FeedbackEntry],
    is_anchored: impl Fn(&FeedbackEntry) -> Option<bool>,
) -> Option<f64> {
    let mut follower_mass = 0.0;
    let mut anchored_mass = 0.0;
    for &entry in followers {
        let Some(anchored) = is_anchored(entry) else {
            continue;
        };
        let weight = ctx.weight_of(&entry.contributor_id);
        if weight <= 0.0 {
            continue;
        }
        follower_mass += weight;
        if anchored {
            anchored_mass += weight;
        }
    }
    if follower_mass <= 0.0 {
        return None;
    }
    Some(anchored_mass / follower_mass)
}

fn distinct_direction_count(entries: &[&FeedbackEntry]) -> usize {
    let mut directions: Vec<String> = entries
        .iter()
        .filter_map(|&entry| vote_direction(entry))
        .collect();
    directions.sort();
    directions.dedup();
    directions.len().max(1)
}

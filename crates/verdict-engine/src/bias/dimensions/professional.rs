//! Professional bloc detection: a cohesive professional cluster pulling the
//! outcome away from everyone else.

use std::collections::BTreeMap;

use verdict_core::{ContributorId, FeedbackEntry, FxHashSet, VerdictResult};

use super::{direction_distribution, total_variation, BiasDimension};
use crate::aggregation::shannon_entropy_bits;
use crate::bias::context::BiasContext;

pub struct ProfessionalDimension;

impl BiasDimension for ProfessionalDimension {
    fn name(&self) -> &'static str {
        "professional"
    }

    /// For each professional cluster large enough to matter:
    /// `cohesion × divergence-from-rest × authority share`. The dimension
    /// score is the worst cluster. A unanimous high-authority bloc voting
    /// against a disagreeing remainder scores close to its authority share.
    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64> {
        let mut clusters: BTreeMap<&str, Vec<&FeedbackEntry>> = BTreeMap::new();
        for &entry in &ctx.entries {
            let Some(cluster) = ctx
                .profile_of(&entry.contributor_id)
                .and_then(|profile| profile.professional_cluster.as_deref())
            else {
                continue;
            };
            clusters.entry(cluster).or_default().push(entry);
        }

        let mut worst: f64 = 0.0;
        for members in clusters.values() {
            if members.len() < ctx.config.min_group_size {
                continue;
            }
            let Some((cluster_dist, cluster_mass)) = direction_distribution(ctx, members) else {
                continue;
            };
            // Entries are one-per-contributor, so membership is by id.
            let member_ids: FxHashSet<&ContributorId> =
                members.iter().map(|e| &e.contributor_id).collect();
            let rest: Vec<&FeedbackEntry> = ctx
                .entries
                .iter()
                .copied()
                .filter(|entry| !member_ids.contains(&entry.contributor_id))
                .collect();
            let Some((rest_dist, rest_mass)) = direction_distribution(ctx, &rest) else {
                // The whole panel is one cluster — no outside reference to
                // diverge from.
                continue;
            };

            let cohesion = if cluster_dist.len() <= 1 {
                1.0
            } else {
                let entropy = shannon_entropy_bits(cluster_dist.values().copied());
                (1.0 - entropy / (cluster_dist.len() as f64).log2()).clamp(0.0, 1.0)
            };
            let divergence = total_variation(&cluster_dist, &rest_dist);
            let share = cluster_mass / (cluster_mass + rest_mass);

            worst = worst.max(cohesion * divergence * share);
        }

        Ok(worst.clamp(0.0, 1.0))
    }
}

//! Bias dimension strategies.
//!
//! A dimension is a pure function from (votes, contributor attributes) to a
//! score in [0, 1]. Dimensions never read each other's output, so heuristics
//! can be swapped or extended without touching the aggregation engine.

pub mod cognitive;
pub mod confirmation;
pub mod demographic;
pub mod geographic;
pub mod professional;
pub mod temporal;

use std::collections::BTreeMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};
use verdict_core::{ContributorProfile, FeedbackEntry, VerdictResult};

use super::context::{vote_direction, BiasContext};

pub use cognitive::CognitiveDimension;
pub use confirmation::ConfirmationDimension;
pub use demographic::DemographicDimension;
pub use geographic::GeographicDimension;
pub use professional::ProfessionalDimension;
pub use temporal::TemporalDimension;

/// An interchangeable bias heuristic. Implementations must be pure: same
/// context, same score, no randomness, no wall clock.
pub trait BiasDimension: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64>;
}

/// The shipped dimension set, in report order.
pub fn default_dimensions() -> Vec<Box<dyn BiasDimension>> {
    vec![
        Box::new(DemographicDimension),
        Box::new(ProfessionalDimension),
        Box::new(TemporalDimension),
        Box::new(GeographicDimension),
        Box::new(CognitiveDimension),
        Box::new(ConfirmationDimension),
    ]
}

/// Label for votes whose contributor did not state the attribute.
pub(crate) const UNSPECIFIED_GROUP: &str = "(unspecified)";

/// Normalized weighted distribution over vote directions, with the total
/// authority mass it was built from. `None` when no vote in the subset has
/// both a direction and positive weight.
pub(crate) fn direction_distribution(
    ctx: &BiasContext<'_>,
    entries: &[&FeedbackEntry],
) -> Option<(BTreeMap<String, f64>, f64)> {
    let mut masses: BTreeMap<String, f64> = BTreeMap::new();
    let mut total = 0.0;
    for &entry in entries {
        let Some(direction) = vote_direction(entry) else {
            continue;
        };
        let weight = ctx.weight_of(&entry.contributor_id);
        if weight <= 0.0 {
            continue;
        }
        *masses.entry(direction).or_insert(0.0) += weight;
        total += weight;
    }
    if total <= 0.0 {
        return None;
    }
    for mass in masses.values_mut() {
        *mass /= total;
    }
    Some((masses, total))
}

/// Total variation distance between two direction distributions, in [0, 1].
pub(crate) fn total_variation(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let mut distance = 0.0;
    for (direction, p) in a {
        distance += (p - b.get(direction).copied().unwrap_or(0.0)).abs();
    }
    for (direction, q) in b {
        if !a.contains_key(direction) {
            distance += q;
        }
    }
    (distance / 2.0).clamp(0.0, 1.0)
}

/// Authority-weighted group skew for one attribute extractor: the mean total
/// variation distance between each group's vote distribution and the overall
/// distribution, weighted by group authority mass and damped by a chi-square
/// significance factor so tiny panels cannot saturate the score.
pub(crate) fn group_skew(
    ctx: &BiasContext<'_>,
    extract: impl Fn(&ContributorProfile) -> Option<&str>,
) -> VerdictResult<f64> {
    let Some((overall, _)) = direction_distribution(ctx, &ctx.entries) else {
        return Ok(0.0);
    };
    if overall.len() < 2 {
        // One direction observed — there is nothing to skew toward.
        return Ok(0.0);
    }

    let mut groups: BTreeMap<String, Vec<&FeedbackEntry>> = BTreeMap::new();
    for &entry in &ctx.entries {
        let label = ctx
            .profile_of(&entry.contributor_id)
            .and_then(|profile| extract(profile))
            .unwrap_or(UNSPECIFIED_GROUP)
            .to_string();
        groups.entry(label).or_default().push(entry);
    }

    let mut qualifying: Vec<(BTreeMap<String, f64>, f64, &[&FeedbackEntry])> = Vec::new();
    for members in groups.values() {
        if members.len() < ctx.config.min_group_size {
            continue;
        }
        if let Some((distribution, mass)) = direction_distribution(ctx, members) {
            qualifying.push((distribution, mass, members.as_slice()));
        }
    }
    if qualifying.len() < 2 {
        return Ok(0.0);
    }

    let total_mass: f64 = qualifying.iter().map(|(_, mass, _)| mass).sum();
    let skew: f64 = qualifying
        .iter()
        .map(|(distribution, mass, _)| (mass / total_mass) * total_variation(distribution, &overall))
        .sum();

    let significance = contingency_significance(
        &overall,
        qualifying.iter().map(|(_, _, members)| *members),
    );

    Ok((skew * significance).clamp(0.0, 1.0))
}

/// Chi-square CDF of the group × direction contingency statistic, computed
/// over unweighted vote counts. Approaches 1.0 when the split is too sharp
/// to be sampling noise, 0.0 when the table is too small to tell.
fn contingency_significance<'e>(
    overall: &BTreeMap<String, f64>,
    groups: impl Iterator<Item = &'e [&'e FeedbackEntry]>,
) -> f64 {
    let directions: Vec<&String> = overall.keys().collect();
    let group_counts: Vec<Vec<f64>> = groups
        .map(|members| {
            directions
                .iter()
                .map(|direction| {
                    members
                        .iter()
                        .filter(|&&entry| vote_direction(entry).as_deref() == Some(direction.as_str()))
                        .count() as f64
                })
                .collect()
        })
        .collect();

    let n: f64 = group_counts.iter().flatten().sum();
    if n <= 0.0 {
        return 0.0;
    }
    let row_totals: Vec<f64> = group_counts.iter().map(|row| row.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..directions.len())
        .map(|col| group_counts.iter().map(|row| row[col]).sum())
        .collect();

    let mut statistic = 0.0;
    for (row, row_total) in group_counts.iter().zip(&row_totals) {
        for (observed, col_total) in row.iter().zip(&col_totals) {
            let expected = row_total * col_total / n;
            if expected > 0.0 {
                statistic += (observed - expected).powi(2) / expected;
            }
        }
    }

    let dof = (group_counts.len().saturating_sub(1)) * (directions.len().saturating_sub(1));
    if dof == 0 {
        return 0.0;
    }
    match ChiSquared::new(dof as f64) {
        Ok(distribution) => distribution.cdf(statistic),
        Err(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn total_variation_of_identical_distributions_is_zero() {
        let a = dist(&[("valid", 0.6), ("invalid", 0.4)]);
        assert_eq!(total_variation(&a, &a), 0.0);
    }

    #[test]
    fn total_variation_of_disjoint_distributions_is_one() {
        let a = dist(&[("valid", 1.0)]);
        let b = dist(&[("invalid", 1.0)]);
        assert_eq!(total_variation(&a, &b), 1.0);
    }

    #[test]
    fn total_variation_is_symmetric() {
        let a = dist(&[("valid", 0.8), ("invalid", 0.2)]);
        let b = dist(&[("valid", 0.3), ("invalid", 0.5), ("unclear", 0.2)]);
        assert!((total_variation(&a, &b) - total_variation(&b, &a)).abs() < 1e-12);
    }
}

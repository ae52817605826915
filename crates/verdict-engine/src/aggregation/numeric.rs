//! Weighted descriptive statistics for numeric rating dimensions.

use verdict_core::RatingSummary;

/// Authority-weighted mean and variance over `(value, weight)` samples.
///
/// Returns `None` when no sample carries positive weight — the dimension has
/// no effective signal, which is distinct from a zero mean.
pub fn weighted_summary(samples: &[(f64, f64)]) -> Option<RatingSummary> {
    let total_weight: f64 = samples.iter().map(|(_, w)| w).filter(|w| **w > 0.0).sum();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return None;
    }

    let mean = samples
        .iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(x, w)| x * w)
        .sum::<f64>()
        / total_weight;
    let variance = samples
        .iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(x, w)| w * (x - mean).powi(2))
        .sum::<f64>()
        / total_weight;

    Some(RatingSummary {
        mean,
        variance,
        sample_count: samples.len(),
    })
}

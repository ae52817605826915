//! Authority score computation and track-record smoothing.
//!
//! All functions here are pure: they return new values and never persist
//! anything. Writing scores back (and serializing concurrent updates to the
//! same contributor) is the caller's responsibility.

use verdict_core::errors::ensure_finite;
use verdict_core::models::contributor::RecentWindow;
use verdict_core::models::RECENT_WINDOW_LEN;
use verdict_core::{AuthorityConfig, Contributor, ContributorId, FxHashMap, VerdictError, VerdictResult};

/// Dynamic authority score: `A = α·B + β·T + γ·P`.
///
/// The config is validated on every call — an α+β+γ drift away from 1.0 is a
/// `ConfigError`, surfaced immediately rather than silently renormalized.
pub fn compute_authority(contributor: &Contributor, weights: &AuthorityConfig) -> VerdictResult<f64> {
    weights.validate()?;
    let score = weights.alpha * contributor.baseline_credential_score
        + weights.beta * contributor.track_record_score
        + weights.gamma * contributor.recent_performance_score;
    let score = ensure_finite(score, "authority score", contributor.id.as_str())?;
    Ok(score.clamp(0.0, 1.0))
}

/// Exponentially smoothed track record: `T(t) = λ·T(t−1) + (1−λ)·Q(t)`,
/// clamped to [0, 1].
pub fn update_track_record(
    contributor: &Contributor,
    observed_quality: f64,
    lambda: f64,
) -> VerdictResult<f64> {
    if !observed_quality.is_finite() || !lambda.is_finite() {
        return Err(VerdictError::NumericIntegrity {
            quantity: "observed quality",
            context: contributor.id.to_string(),
        });
    }
    let quality = observed_quality.clamp(0.0, 1.0);
    let lambda = lambda.clamp(0.0, 1.0);
    let smoothed = lambda * contributor.track_record_score + (1.0 - lambda) * quality;
    Ok(smoothed.clamp(0.0, 1.0))
}

/// Push an observation into the bounded recent-quality window and return the
/// new window together with its mean — the `P(t)` input for the next round.
pub fn update_recent_performance(
    contributor: &Contributor,
    observed_quality: f64,
) -> VerdictResult<(RecentWindow, f64)> {
    if !observed_quality.is_finite() {
        return Err(VerdictError::NumericIntegrity {
            quantity: "observed quality",
            context: contributor.id.to_string(),
        });
    }
    let mut window = contributor.recent_window.clone();
    if window.len() == RECENT_WINDOW_LEN {
        window.remove(0);
    }
    window.push(observed_quality.clamp(0.0, 1.0));
    let mean = window.iter().sum::<f64>() / window.len() as f64;
    Ok((window, mean))
}

/// Authority weights for every contributor in the registry slice.
/// Deactivated contributors get weight 0.0 — they stay addressable but add
/// nothing to quorum mass or consensus.
pub fn authority_table(
    contributors: &[Contributor],
    weights: &AuthorityConfig,
) -> VerdictResult<FxHashMap<ContributorId, f64>> {
    let mut table = FxHashMap::default();
    for contributor in contributors {
        let authority = if contributor.active {
            compute_authority(contributor, weights)?
        } else {
            0.0
        };
        table.insert(contributor.id.clone(), authority);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use verdict_core::ConfigError;

    use super::*;

    fn contributor(id: &str, baseline: f64, track: f64, recent: f64) -> Contributor {
        let mut c = Contributor::onboard(id, baseline);
        c.track_record_score = track;
        c.recent_performance_score = recent;
        c
    }

    #[test]
    fn authority_is_weighted_blend() {
        let c = contributor("a", 1.0, 0.5, 0.0);
        let weights = AuthorityConfig {
            alpha: 0.5,
            beta: 0.3,
            gamma: 0.2,
            lambda: 0.95,
        };
        let score = compute_authority(&c, &weights).unwrap();
        assert!((score - (0.5 + 0.15)).abs() < 1e-12);
    }

    #[test]
    fn invalid_weight_sum_is_config_error() {
        let c = contributor("a", 0.5, 0.5, 0.5);
        let weights = AuthorityConfig {
            alpha: 0.5,
            beta: 0.5,
            gamma: 0.5,
            lambda: 0.95,
        };
        let err = compute_authority(&c, &weights).unwrap_err();
        assert!(matches!(
            err,
            VerdictError::Config(ConfigError::WeightSumInvalid { .. })
        ));
    }

    #[test]
    fn track_record_smoothing_moves_toward_quality() {
        let c = contributor("a", 0.5, 0.5, 0.5);
        let up = update_track_record(&c, 1.0, 0.95).unwrap();
        assert!((up - 0.525).abs() < 1e-12);
        let down = update_track_record(&c, 0.0, 0.95).unwrap();
        assert!((down - 0.475).abs() < 1e-12);
    }

    #[test]
    fn track_record_rejects_nan_quality() {
        let c = contributor("a", 0.5, 0.5, 0.5);
        assert!(matches!(
            update_track_record(&c, f64::NAN, 0.95),
            Err(VerdictError::NumericIntegrity { .. })
        ));
    }

    #[test]
    fn recent_window_is_bounded() {
        let mut c = contributor("a", 0.5, 0.5, 0.5);
        for _ in 0..RECENT_WINDOW_LEN {
            let (window, mean) = update_recent_performance(&c, 1.0).unwrap();
            c.recent_window = window;
            c.recent_performance_score = mean;
        }
        assert_eq!(c.recent_window.len(), RECENT_WINDOW_LEN);
        assert!((c.recent_performance_score - 1.0).abs() < 1e-12);

        // One bad round dents the mean by exactly one slot.
        let (window, mean) = update_recent_performance(&c, 0.0).unwrap();
        assert_eq!(window.len(), RECENT_WINDOW_LEN);
        assert!((mean - (RECENT_WINDOW_LEN as f64 - 1.0) / RECENT_WINDOW_LEN as f64).abs() < 1e-12);
    }

    #[test]
    fn inactive_contributors_carry_zero_weight() {
        let mut inactive = contributor("gone", 1.0, 1.0, 1.0);
        inactive.deactivate();
        let active = contributor("here", 1.0, 1.0, 1.0);
        let table = authority_table(&[inactive, active], &AuthorityConfig::default()).unwrap();
        assert_eq!(table[&ContributorId::from("gone")], 0.0);
        assert!((table[&ContributorId::from("here")] - 1.0).abs() < 1e-12);
    }
}

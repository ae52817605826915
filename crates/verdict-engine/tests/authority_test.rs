//! Authority tracker tests — weighted blend, neutral prior, smoothing.

use verdict_core::{AuthorityConfig, Contributor, ContributorId, VerdictError};
use verdict_engine::authority::{
    authority_table, compute_authority, update_recent_performance, update_track_record,
};

fn contributor(id: &str, baseline: f64, track: f64, recent: f64) -> Contributor {
    let mut c = Contributor::onboard(id, baseline);
    c.track_record_score = track;
    c.recent_performance_score = recent;
    c
}

#[test]
fn authority_stays_in_unit_interval_across_grid() {
    let weights = AuthorityConfig::default();
    for b in 0..=10 {
        for t in 0..=10 {
            for p in 0..=10 {
                let c = contributor("x", b as f64 / 10.0, t as f64 / 10.0, p as f64 / 10.0);
                let score = compute_authority(&c, &weights).unwrap();
                assert!(
                    (0.0..=1.0).contains(&score),
                    "B={b} T={t} P={p} gave {score}"
                );
            }
        }
    }
}

#[test]
fn new_contributor_starts_at_neutral_track_record() {
    let c = Contributor::onboard("fresh", 0.7);
    let weights = AuthorityConfig {
        alpha: 0.0,
        beta: 1.0,
        gamma: 0.0,
        lambda: 0.95,
    };
    // With all weight on the track record, a fresh contributor scores the
    // 0.5 neutral prior.
    let score = compute_authority(&c, &weights).unwrap();
    assert!((score - 0.5).abs() < 1e-12);
}

#[test]
fn weight_sum_off_by_one_percent_is_rejected() {
    let c = contributor("x", 0.5, 0.5, 0.5);
    let weights = AuthorityConfig {
        alpha: 0.34,
        beta: 0.34,
        gamma: 0.33,
        lambda: 0.95,
    };
    assert!(matches!(
        compute_authority(&c, &weights),
        Err(VerdictError::Config(_))
    ));
}

#[test]
fn smoothing_converges_to_sustained_quality() {
    let mut c = contributor("x", 0.5, 0.5, 0.5);
    // 200 perfect rounds with λ=0.95 pull the track record close to 1.0.
    for _ in 0..200 {
        c.track_record_score = update_track_record(&c, 1.0, 0.95).unwrap();
    }
    assert!(c.track_record_score > 0.99);
    assert!(c.track_record_score <= 1.0);
}

#[test]
fn single_round_moves_track_record_by_one_minus_lambda() {
    let c = contributor("x", 0.5, 0.8, 0.5);
    let updated = update_track_record(&c, 0.0, 0.95).unwrap();
    assert!((updated - 0.76).abs() < 1e-12);
}

#[test]
fn out_of_range_quality_is_clamped_not_amplified() {
    let c = contributor("x", 0.5, 0.5, 0.5);
    let updated = update_track_record(&c, 7.5, 0.95).unwrap();
    // Clamped to 1.0 before smoothing.
    assert!((updated - 0.525).abs() < 1e-12);
}

#[test]
fn recent_performance_tracks_short_window_only() {
    let mut c = contributor("x", 0.5, 0.5, 0.5);
    // Eight poor rounds, then eight perfect ones: the window forgets the
    // poor streak completely.
    for _ in 0..8 {
        let (window, mean) = update_recent_performance(&c, 0.0).unwrap();
        c.recent_window = window;
        c.recent_performance_score = mean;
    }
    assert_eq!(c.recent_performance_score, 0.0);
    for _ in 0..8 {
        let (window, mean) = update_recent_performance(&c, 1.0).unwrap();
        c.recent_window = window;
        c.recent_performance_score = mean;
    }
    assert_eq!(c.recent_performance_score, 1.0);
}

#[test]
fn authority_table_covers_every_registered_contributor() {
    let mut inactive = contributor("retired", 0.9, 0.9, 0.9);
    inactive.deactivate();
    let roster = vec![
        contributor("a", 1.0, 1.0, 1.0),
        contributor("b", 0.0, 0.0, 0.0),
        inactive,
    ];
    let table = authority_table(&roster, &AuthorityConfig::default()).unwrap();
    assert_eq!(table.len(), 3);
    assert!((table[&ContributorId::from("a")] - 1.0).abs() < 1e-12);
    assert_eq!(table[&ContributorId::from("b")], 0.0);
    assert_eq!(table[&ContributorId::from("retired")], 0.0);
}

//! Aggregation benchmark (1K and 10K entries over four categories).

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use verdict_core::{
    ContributorId, FeedbackEntry, FxHashMap, StructuredJudgment, TaskId, TaskPolicy,
};
use verdict_engine::{aggregate, quorum};

const CATEGORIES: [&str; 4] = ["valid", "invalid", "needs_revision", "unclear"];

fn make_round(n: usize) -> (Vec<FeedbackEntry>, FxHashMap<ContributorId, f64>) {
    let entries: Vec<FeedbackEntry> = (0..n)
        .map(|i| FeedbackEntry {
            contributor_id: format!("expert-{i}").into(),
            task_id: "task-bench".into(),
            entity_type: "legal_analysis".into(),
            judgment: StructuredJudgment::categorical(CATEGORIES[i % CATEGORIES.len()])
                .with_aspect("accuracy", ((i % 10) as f64) / 10.0),
            note: None,
            submitted_at: Utc.timestamp_opt(1_750_000_000 + i as i64, 0).unwrap(),
        })
        .collect();
    let weights = (0..n)
        .map(|i| {
            (
                ContributorId::from(format!("expert-{i}")),
                0.1 + ((i % 9) as f64) / 10.0,
            )
        })
        .collect();
    (entries, weights)
}

fn bench_aggregate(c: &mut Criterion) {
    let task_id = TaskId::from("task-bench");
    let policy = TaskPolicy::default();

    for n in [1_000usize, 10_000] {
        let (entries, weights) = make_round(n);
        let decision = quorum::evaluate(&entries, &weights, &policy);
        c.bench_function(&format!("aggregate_{n}_entries"), |b| {
            b.iter(|| {
                let result = aggregate(
                    black_box(&task_id),
                    black_box(&entries),
                    black_box(&weights),
                    black_box(&policy),
                    black_box(&decision),
                )
                .unwrap();
                black_box(result);
            })
        });
    }
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);

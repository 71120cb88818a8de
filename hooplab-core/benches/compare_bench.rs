//! Criterion benchmarks for the ranking hot path.
//!
//! The feed annotates every visible card with a percentile report, so
//! `overall_percentile` runs once per card against the full position peer
//! set. These benches size that cost at realistic and worst-case peer
//! counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hooplab_core::compare::{overall_percentile, DEFAULT_RANKED_FIELDS};
use hooplab_core::domain::{Build, BuildDraft, BuildId, Position, UserId};

fn make_peers(n: usize) -> Vec<Build> {
    let (min, max) = Position::PG.height_range();
    (0..n)
        .map(|i| {
            let draft = BuildDraft {
                position: Position::PG,
                role: "ISO Guard".to_string(),
                height: min + (i as u32 % (max - min + 1)),
                weight: 150 + (i as u32 % 100),
                wingspan: min + (i as u32 % (max - min + 1)),
                ..BuildDraft::default()
            };
            let mut build = Build::from_draft(
                &draft,
                UserId::new("bench"),
                "BenchTag".to_string(),
                chrono::Utc::now(),
            );
            build.id = BuildId::new(format!("b{i}"));
            build
        })
        .collect()
}

fn bench_overall_percentile(c: &mut Criterion) {
    let mut group = c.benchmark_group("overall_percentile");
    for &n in &[10usize, 100, 1_000, 10_000] {
        let peers = make_peers(n);
        let target = peers[n / 2].clone();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                overall_percentile(
                    black_box(&target),
                    black_box(&peers),
                    &DEFAULT_RANKED_FIELDS,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_overall_percentile);
criterion_main!(benches);

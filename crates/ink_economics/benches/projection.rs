//! Benchmarks for the projection pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ink_economics::prelude::*;
use rust_decimal::Decimal;

fn bench_emission_schedule(c: &mut Criterion) {
    let params = EmissionParams::default();

    c.bench_function("emission_schedule_build", |b| {
        b.iter(|| EmissionSchedule::build(black_box(&params)))
    });
}

fn bench_network_projection(c: &mut Criterion) {
    c.bench_function("project_network_metrics", |b| {
        b.iter(|| {
            project_network_metrics(
                black_box(48),
                black_box(Decimal::from(6_000)),
                black_box(Decimal::from(270_000)),
            )
        })
    });
}

fn bench_full_projection(c: &mut Criterion) {
    let config = ModelConfig::default();

    c.bench_function("projection_from_config", |b| {
        b.iter(|| Projection::from_config(black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_emission_schedule,
    bench_network_projection,
    bench_full_projection
);
criterion_main!(benches);

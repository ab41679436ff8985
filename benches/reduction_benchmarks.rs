//! Benchmarks for the QUMO reduction pipeline and market assembly.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qumoreductions::market::{Market, SettlementProgram};
use qumoreductions::reduce::reduce_to_qumo;
use qumoreductions::testing::{random_bounded_model, random_scenario};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmark the full Core A pipeline on models of varying sizes.
fn bench_reduce_to_qumo(c: &mut Criterion) {
    let mut group = c.benchmark_group("ReduceToQumo");

    for n in [4, 8, 16, 32].iter() {
        let mut rng = StdRng::seed_from_u64(*n as u64);
        let model = random_bounded_model(&mut rng, *n, *n, 2 * *n);

        group.bench_with_input(BenchmarkId::new("mixed", n), n, |b, _| {
            b.iter(|| reduce_to_qumo(black_box(&model), 10.0).unwrap())
        });
    }

    group.finish();
}

/// Benchmark scenario assembly and IP construction.
fn bench_settlement_formulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("SettlementFormulation");

    for n in [8, 16, 32].iter() {
        let mut rng = StdRng::seed_from_u64(*n as u64);
        let scenario = random_scenario(&mut rng, *n, 4 * *n);

        group.bench_with_input(BenchmarkId::new("assemble", n), n, |b, _| {
            b.iter(|| {
                let market = Market::<f64>::from_scenario(black_box(&scenario)).unwrap();
                SettlementProgram::build(&market)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduce_to_qumo, bench_settlement_formulation);
criterion_main!(benches);

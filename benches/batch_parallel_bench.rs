//! Compare sequential vs parallel batch run times.
//!
//! Run with: `cargo bench --bench batch_parallel`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use castsim::combat::{simulate_batch, simulate_batch_parallel, KillScenario};
use castsim::xp::XpTable;

fn bench_batch_sequential_vs_parallel(c: &mut Criterion) {
    let table = XpTable::generate();
    let scenario = KillScenario {
        seed: Some(42),
        ..KillScenario::default()
    };
    let rounds = 2000;

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);
    group.measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(simulate_batch(rounds, &scenario, &table)));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(simulate_batch_parallel(rounds, &scenario, &table)));
    });

    group.finish();
}

criterion_group!(benches, bench_batch_sequential_vs_parallel);
criterion_main!(benches);

//! Criterion micro-benchmarks for cycle stepping and resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use veld_bench::{reference_profile, stress_profile};
use veld_core::Kind;
use veld_engine::Ecosystem;

/// Run one full cycle with actions from `rng`.
fn drive_cycle(eco: &mut Ecosystem, rng: &mut ChaCha8Rng) {
    let mut ids = eco.active_ids(Kind::Predator).to_vec();
    ids.extend_from_slice(eco.active_ids(Kind::Prey));
    if ids.is_empty() {
        eco.reset(None);
        return;
    }
    let n_actions = eco.n_actions();
    let last = ids.len() - 1;
    for (i, id) in ids.into_iter().enumerate() {
        let action = rng.random_range(0..n_actions);
        eco.step(action, id, i == last).unwrap();
    }
}

/// Benchmark: one full cycle on the reference 16x16 profile.
fn bench_cycle_reference(c: &mut Criterion) {
    let mut eco = Ecosystem::new(reference_profile(42)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    c.bench_function("cycle_reference_16x16", |b| {
        b.iter(|| {
            drive_cycle(&mut eco, &mut rng);
            black_box(eco.cycle_count());
        });
    });
}

/// Benchmark: one full cycle on the 64x64 stress profile.
fn bench_cycle_stress(c: &mut Criterion) {
    let mut eco = Ecosystem::new(stress_profile(42)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    c.bench_function("cycle_stress_64x64", |b| {
        b.iter(|| {
            drive_cycle(&mut eco, &mut rng);
            black_box(eco.cycle_count());
        });
    });
}

/// Benchmark: episode reset (placement of all populations).
fn bench_reset_stress(c: &mut Criterion) {
    let mut eco = Ecosystem::new(stress_profile(42)).unwrap();

    c.bench_function("reset_stress_64x64", |b| {
        b.iter(|| {
            eco.reset(None);
            black_box(eco.active_count(Kind::Grass));
        });
    });
}

criterion_group!(
    benches,
    bench_cycle_reference,
    bench_cycle_stress,
    bench_reset_stress
);
criterion_main!(benches);

//! Benchmarks for the CPU side of the frame: motion step and the O(n²)
//! connection pass.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use netfield::{FieldConfig, ParticleField};

fn bench_connection_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("connection_pass");

    for count in [100u32, 200, 400] {
        let field = ParticleField::seeded(&FieldConfig::default(), count, 42);
        group.bench_with_input(BenchmarkId::from_parameter(count), &field, |b, field| {
            b.iter(|| black_box(field.connections()))
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for count in [100u32, 200, 400] {
        let mut field = ParticleField::seeded(&FieldConfig::default(), count, 42);
        let mut elapsed = 0.0f32;
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                elapsed += 1.0 / 60.0;
                field.step(black_box(elapsed));
            })
        });
    }

    group.finish();
}

fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    let mut field = ParticleField::seeded(&FieldConfig::default(), 200, 42);
    let mut elapsed = 0.0f32;
    group.bench_function("step_and_connect_200", |b| {
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            field.step(elapsed);
            black_box(field.connections())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_connection_pass, bench_step, bench_full_frame);
criterion_main!(benches);

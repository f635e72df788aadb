use criterion::{Criterion, black_box, criterion_group, criterion_main};

use shapegen::noise::create_noise_2d;
use shapegen::shape::calculate_tangent_bitangent;
use shapegen::shape::generators::{create_cube, create_sphere, create_torus};

// ---------------------------------------------------------------------------
// Shape generation
// ---------------------------------------------------------------------------

fn bench_create_sphere_low(c: &mut Criterion) {
    c.bench_function("create_sphere_16", |b| {
        b.iter(|| create_sphere(black_box(1.0), black_box(16)));
    });
}

fn bench_create_sphere_medium(c: &mut Criterion) {
    c.bench_function("create_sphere_64", |b| {
        b.iter(|| create_sphere(black_box(1.0), black_box(64)));
    });
}

fn bench_create_sphere_high(c: &mut Criterion) {
    c.bench_function("create_sphere_128", |b| {
        b.iter(|| create_sphere(black_box(1.0), black_box(128)));
    });
}

fn bench_create_torus(c: &mut Criterion) {
    c.bench_function("create_torus_32x32", |b| {
        b.iter(|| create_torus(black_box(0.5), black_box(1.0), black_box(32), black_box(32)));
    });
}

fn bench_create_cube(c: &mut Criterion) {
    c.bench_function("create_cube", |b| {
        b.iter(|| create_cube(black_box(1.0)));
    });
}

// ---------------------------------------------------------------------------
// Tangent-space recomputation
// ---------------------------------------------------------------------------

fn bench_calculate_tangent_bitangent(c: &mut Criterion) {
    let sphere = create_sphere(1.0, 64).unwrap();
    c.bench_function("calculate_tangent_bitangent_sphere_64", |b| {
        b.iter(|| {
            let mut shape = sphere.clone();
            calculate_tangent_bitangent(&mut shape).unwrap();
            black_box(shape)
        });
    });
}

// ---------------------------------------------------------------------------
// Noise rasters
// ---------------------------------------------------------------------------

fn bench_noise_2d(c: &mut Criterion) {
    c.bench_function("create_noise_2d_128", |b| {
        b.iter(|| {
            create_noise_2d(
                black_box(128),
                black_box(128),
                black_box(42),
                black_box(4.0),
                black_box(128.0),
                black_box(0.5),
                black_box(4),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_create_sphere_low,
    bench_create_sphere_medium,
    bench_create_sphere_high,
    bench_create_torus,
    bench_create_cube,
    bench_calculate_tangent_bitangent,
    bench_noise_2d,
);
criterion_main!(benches);

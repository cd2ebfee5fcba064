mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use support_rate::prelude::*;

const COUNTS: [usize; 4] = [20, 100, 400, 1000];
const SEPARATIONS: [f32; 3] = [0.0, 1.0, 2.0];

fn placement_flat_benches(c: &mut Criterion) {
    for &min_separation in &SEPARATIONS {
        let mut group = c.benchmark_group(format!("placement/flat/separation_{min_separation:.1}"));

        for &count in &COUNTS {
            let side = (count as f32).sqrt() * 5.0;
            let request = PlacementRequest::new(side, side, count)
                .with_min_separation(min_separation)
                .with_exclusion_radius(3.0);
            let sampler = PlacementSampler::new(request);
            let probe = FlatGround::new(0.0);
            group.throughput(common::elements_throughput(request.max_attempts()));

            let mut rng = StdRng::seed_from_u64(0x5EED_u64 ^ count as u64);
            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
                b.iter(|| {
                    let result = sampler.sample(&probe, &mut rng);
                    black_box(result.len());
                });
            });
        }

        group.finish();
    }
}

fn placement_height_grid_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/height_grid");
    let grid = HeightGrid::from_fn(Vec2::ZERO, 0.5, 81, 81, |x, z| (x * 0.3).sin() + (z * 0.2).cos())
        .expect("valid grid");

    for &count in &COUNTS {
        let request = PlacementRequest::new(40.0, 40.0, count).with_min_separation(0.5);
        let sampler = PlacementSampler::new(request);
        group.throughput(common::elements_throughput(request.max_attempts()));

        let mut rng = StdRng::seed_from_u64(0xB1E5_u64 ^ count as u64);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let result = sampler.sample(&grid, &mut rng);
                black_box(result.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = placement_flat_benches, placement_height_grid_benches
}
criterion_main!(benches);

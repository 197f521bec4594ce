// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for the per-tick stepping pipeline
//!
//! These benchmarks measure:
//! - Full `World::step` throughput for increasing body counts
//! - The acceleration pass alone, which dominates at scale
//! - Merge-heavy ticks where many overlapping bodies fuse at once

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gravity_engine::forces::SoftenedGravity;
use gravity_engine::store::Acceleration;
use gravity_engine::World;

// Bodies on a loose grid around the region center, far enough apart to not touch
fn populate_grid(world: &mut World, count: usize) {
    let side = (count as f64).sqrt().ceil() as usize;
    for i in 0..count {
        let x = 200.0 + (i % side) as f64 * 25.0;
        let y = 100.0 + (i / side) as f64 * 25.0;
        world.create(x, y, 3);
    }
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for count in [10, 100, 500, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let mut world = World::new();
            populate_grid(&mut world, count);
            let snapshot = world.snapshot();

            b.iter(|| {
                world.restore(snapshot.clone());
                black_box(world.step())
            });
        });
    }

    group.finish();
}

fn bench_accelerations(c: &mut Criterion) {
    let mut group = c.benchmark_group("gravity_accelerations");
    let gravity = SoftenedGravity::default();

    for count in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let mut world = World::new();
            populate_grid(&mut world, count);
            let mut out: Vec<Acceleration> = Vec::with_capacity(count);

            b.iter(|| {
                gravity.compute_accelerations(black_box(world.bodies()), &mut out);
                black_box(out.len())
            });
        });
    }

    group.finish();
}

fn bench_merge_storm(c: &mut Criterion) {
    c.bench_function("merge_storm_200", |b| {
        let mut world = World::new();
        world.set_merge_on_collision(true);
        for i in 0..200 {
            // Tightly packed rows that all overlap their neighbours
            world.create(700.0 + (i % 20) as f64 * 6.0, 500.0 + (i / 20) as f64 * 6.0, 4);
        }
        let snapshot = world.snapshot();

        b.iter(|| {
            world.restore(snapshot.clone());
            black_box(world.step())
        });
    });
}

criterion_group!(benches, bench_step, bench_accelerations, bench_merge_storm);
criterion_main!(benches);

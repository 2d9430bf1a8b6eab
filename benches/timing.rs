#![feature(portable_simd)]

use std::hint::black_box;
use std::simd::Simd;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, criterion_group, criterion_main};

use vecbench::clock::{CycleSource, Tsc};
use vecbench::{Opaque, fake_modify_memory, fake_read_memory};

fn barrier_bench<'a, T: Opaque + Copy>(
    mut group: BenchmarkGroup<'a, WallTime>,
    name: &str,
    init: T,
) -> BenchmarkGroup<'a, WallTime> {
    group.bench_function(name, |b| {
        let mut x = init;
        b.iter(|| {
            x.fake_modify();
            x.fake_read();
        })
    });
    group
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("cycle counter read", |b| {
        let mut tsc = Tsc;
        b.iter(|| black_box(tsc.now()))
    });

    let group = c.benchmark_group("fake_modify + fake_read");
    let group = barrier_bench(group, "u8", 1u8);
    let group = barrier_bench(group, "f64", 1.0f64);
    let group = barrier_bench(group, "Simd<f32, 8>", Simd::<f32, 8>::splat(1.0));
    let group = barrier_bench(group, "[i32; 16]", [1i32; 16]);
    group.finish();

    c.bench_function("memory barriers on 4 KiB", |b| {
        let mut mem = vec![0u8; 64 * 64];
        b.iter(|| {
            fake_modify_memory(mem.as_mut_slice());
            fake_read_memory(mem.as_slice());
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

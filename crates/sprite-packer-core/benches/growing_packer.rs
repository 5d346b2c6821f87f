use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use sprite_packer_core::prelude::*;
use std::hint::black_box;

fn generate_rects(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(count as u64);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("icon_{}", i), w, h)
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("growing_packer");

    for count in [50, 200, 1000] {
        let rects = generate_rects(count, 8, 64);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("mixed", count), &rects, |b, rects| {
            b.iter(|| {
                let out = pack_layout(rects.clone(), PackerConfig::default());
                black_box(out)
            });
        });

        // icon sheets are mostly identical squares after resizing
        let squares: Vec<(String, u32, u32)> =
            (0..count).map(|i| (format!("icon_{}", i), 32, 32)).collect();
        group.bench_with_input(BenchmarkId::new("squares", count), &squares, |b, squares| {
            b.iter(|| black_box(pack_layout(squares.clone(), PackerConfig::default())));
        });
    }

    group.finish();
}

fn bench_occupancy(c: &mut Criterion) {
    let rects = generate_rects(500, 4, 128);
    let out = pack_layout(rects.clone(), PackerConfig::default()).expect("pack");
    println!("occupancy (500 mixed): {}", out.stats().summary());

    c.bench_function("pack_and_stats_500", |b| {
        b.iter(|| {
            let out = pack_layout(rects.clone(), PackerConfig::default()).expect("pack");
            black_box(out.stats())
        });
    });
}

criterion_group!(benches, bench_pack, bench_occupancy);
criterion_main!(benches);

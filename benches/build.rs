//! Benchmark: tree construction across input counts and hashers.
//!
//! Covers perfect (power-of-two) and unbalanced input counts, since the
//! unbalanced shapes take a different split at every odd range.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use merkle_levels::{Blake3Hasher, MerkleTree, Sha256Hasher, TreeBuilder};

fn generate_inputs(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("input-{i}")).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for count in [1_000, 1_024, 10_000, 16_384, 100_000] {
        let inputs = generate_inputs(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("sha256", count), &inputs, |b, inputs| {
            let builder: TreeBuilder<Sha256Hasher> = TreeBuilder::default();
            b.iter(|| black_box(builder.build(inputs)))
        });

        group.bench_with_input(BenchmarkId::new("blake3", count), &inputs, |b, inputs| {
            let builder: TreeBuilder<Blake3Hasher> = TreeBuilder::default();
            b.iter(|| black_box(builder.build(inputs)))
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let tree = MerkleTree::build(&generate_inputs(100_000)).unwrap();

    group.bench_function("level_scan", |b| {
        b.iter(|| {
            let mut total = 0;
            for i in 1..=tree.height() + 1 {
                total += black_box(tree.level(i)).len();
            }
            total
        })
    });

    group.bench_function("leaves", |b| b.iter(|| black_box(tree.leaves())));

    group.bench_function("verify", |b| b.iter(|| black_box(tree.verify())));

    group.finish();
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);

// Criterion benchmarks for ordered parallel compaction.
//
// Groups:
//   compact_sizes        1M / 4M / 16M i32 at ~50% selectivity, default workers
//   compact_selectivity  4M i32 at 1% .. 99% selectivity
//   compact_workers      4M i32 at 50%, worker count 1 .. 16
//   compact_merge        4M i32 at 50%, serial vs parallel scatter
//
// Every case reuses one pre-sized output buffer so only the filter is timed.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use compact_filter::{available_workers, CompactConfig, Compactor, MergeMode};
use rand::Rng;

fn gen_i32(n: usize) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(0..1_000_000i32)).collect()
}

fn compactor(workers: usize, merge: MergeMode) -> Compactor {
    Compactor::new(
        CompactConfig::default()
            .with_workers(workers)
            .with_merge(merge),
    )
    .unwrap()
}

// ── compact_sizes: 1M, 4M, 16M at 50% selectivity ─────────────────────────

fn compact_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_sizes");
    let compactor = Compactor::default();

    for &n in &[1_000_000usize, 4_000_000, 16_000_000] {
        let data = gen_i32(n);
        let mut out = vec![0i32; n];

        group.throughput(Throughput::Elements(n as u64));
        let label = format!("{}M", n / 1_000_000);
        group.bench_with_input(BenchmarkId::new("ge_500k", &label), &n, |b, _| {
            b.iter(|| compactor.filter(&data, &mut out, |&v| v >= 500_000).unwrap());
        });
    }
    group.finish();
}

// ── compact_selectivity: 4M at 1%, 10%, 50%, 90%, 99% ─────────────────────

fn compact_selectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_selectivity");
    let compactor = Compactor::default();
    let n = 4_000_000usize;
    let data = gen_i32(n);
    let mut out = vec![0i32; n];

    // Data is uniform 0..1M, so `v >= t` keeps (1M - t) / 1M of it.
    let cases: &[(&str, i32)] = &[
        ("1pct", 990_000),
        ("10pct", 900_000),
        ("50pct", 500_000),
        ("90pct", 100_000),
        ("99pct", 10_000),
    ];

    group.throughput(Throughput::Elements(n as u64));
    for &(label, threshold) in cases {
        group.bench_with_input(BenchmarkId::new("ge", label), &threshold, |b, &t| {
            b.iter(|| compactor.filter(&data, &mut out, |&v| v >= t).unwrap());
        });
    }
    group.finish();
}

// ── compact_workers: 4M at 50%, P = 1, 2, 4, 8, 16 ────────────────────────

fn compact_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_workers");
    let n = 4_000_000usize;
    let data = gen_i32(n);
    let mut out = vec![0i32; n];

    group.throughput(Throughput::Elements(n as u64));
    for &workers in &[1usize, 2, 4, 8, 16] {
        let compactor = compactor(workers, MergeMode::Parallel);
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| compactor.filter(&data, &mut out, |&v| v >= 500_000).unwrap());
        });
    }
    group.finish();
}

// ── compact_merge: serial (limited) vs parallel (full) scatter ─────────────

fn compact_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_merge");
    let n = 4_000_000usize;
    let data = gen_i32(n);
    let mut out = vec![0i32; n];
    let workers = available_workers();

    group.throughput(Throughput::Elements(n as u64));
    for merge in [MergeMode::Serial, MergeMode::Parallel] {
        let compactor = compactor(workers, merge);
        group.bench_function(merge.as_str(), |b| {
            b.iter(|| compactor.filter(&data, &mut out, |&v| v >= 500_000).unwrap());
        });
    }

    // The sequential reference, for scale.
    group.bench_function("iter_filter", |b| {
        b.iter(|| data.iter().copied().filter(|&v| v >= 500_000).count());
    });
    group.finish();
}

criterion_group!(
    benches,
    compact_sizes,
    compact_selectivity,
    compact_workers,
    compact_merge,
);
criterion_main!(benches);

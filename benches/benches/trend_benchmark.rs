//! Import and trend estimation benchmarks.
//!
//! Run with: `cargo bench --package perfslope-bench`

use chrono::TimeDelta;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use perfslope_bench::{base_time, synthetic_counters, synthetic_export};
use perfslope_lib::{TrendEstimator, ValueScale, import_counters, linear_regression};
use std::hint::black_box;

/// One hour of one-second samples.
const HOUR: usize = 3600;

fn regression_benchmark(c: &mut Criterion) {
    let points: Vec<(f64, f64)> = (0..HOUR)
        .map(|i| (i as f64 / 60.0, 1000.0 + 3.0 * i as f64 + (i % 11) as f64))
        .collect();

    let mut group = c.benchmark_group("regression");
    group.throughput(Throughput::Elements(HOUR as u64));
    group.bench_function("linear_regression/3600", |b| {
        b.iter(|| linear_regression(black_box(&points)));
    });
    group.finish();
}

fn estimator_benchmark(c: &mut Criterion) {
    let estimator = TrendEstimator::new(ValueScale::Kilobytes);
    let start = base_time();
    let end = start + TimeDelta::seconds(HOUR as i64);

    let mut group = c.benchmark_group("estimator");
    for counters in [1, 10, 50] {
        let data = synthetic_counters(counters, HOUR);
        group.throughput(Throughput::Elements((counters * HOUR) as u64));
        group.bench_with_input(BenchmarkId::new("compute", counters), &data, |b, data| {
            b.iter(|| estimator.compute(black_box(data), start, end, 50.0));
        });
    }
    group.finish();
}

fn import_benchmark(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        eprintln!("Skipping import benchmark: cannot start tokio runtime");
        return;
    };

    let mut group = c.benchmark_group("import");
    group.sample_size(20);
    for counters in [1, 10] {
        let export = synthetic_export(counters, HOUR);
        group.throughput(Throughput::Bytes(export.len() as u64));
        group.bench_with_input(BenchmarkId::new("pdh_csv", counters), &export, |b, export| {
            b.to_async(&runtime)
                .iter(|| async { import_counters(black_box(export.as_bytes())).await });
        });
    }
    group.finish();
}

criterion_group!(benches, regression_benchmark, estimator_benchmark, import_benchmark);
criterion_main!(benches);

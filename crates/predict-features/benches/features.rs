//! Benchmarks for the feature engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use predict_core::types::Bar;
use predict_features::{IndicatorEngine, Rsi, Sma};

fn generate_bars(size: usize) -> Vec<Bar> {
    (0..size)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar::new(i as i64 * 60_000, close, close + 1.0, close - 1.0, close, 1000.0)
        })
        .collect()
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [1000, 10000, 100000].iter() {
        let data: Vec<f64> = generate_bars(*size).iter().map(|b| b.close).collect();

        group.bench_with_input(BenchmarkId::new("period_50", size), &data, |b, data| {
            let sma = Sma::new(50);
            b.iter(|| sma.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data: Vec<f64> = generate_bars(*size).iter().map(|b| b.close).collect();

        group.bench_with_input(BenchmarkId::new("period_14", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("IndicatorEngine");

    for size in [1000, 10000, 100000].iter() {
        let bars = generate_bars(*size);

        group.bench_with_input(BenchmarkId::new("compute", size), &bars, |b, bars| {
            let engine = IndicatorEngine::new();
            b.iter(|| engine.compute(black_box(bars)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sma, benchmark_rsi, benchmark_engine);
criterion_main!(benches);

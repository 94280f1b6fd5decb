//! Criterion benchmarks for pricer_core numerics.
//!
//! Measures the normal CDF used by every closed-form price and the
//! historical volatility estimator across series lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::statistics::TRADING_DAYS_PER_YEAR;
use pricer_core::math::{historical_volatility, norm_cdf, ReturnKind};

/// Deterministic price series with a small oscillation around a trend.
fn generate_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 * (1.0 + 0.0002 * t) * (1.0 + 0.01 * (0.7 * t).sin())
        })
        .collect()
}

fn bench_norm_cdf(c: &mut Criterion) {
    let xs: Vec<f64> = (0..1_000).map(|i| -5.0 + i as f64 * 0.01).collect();

    c.bench_function("norm_cdf/single", |b| b.iter(|| norm_cdf(black_box(0.35_f64))));
    c.bench_function("norm_cdf/sweep_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_cdf(black_box(x))).sum::<f64>())
    });
}

fn bench_historical_volatility(c: &mut Criterion) {
    let mut group = c.benchmark_group("historical_volatility");

    for size in [252, 2_520, 25_200] {
        let prices = generate_prices(size);
        for kind in [ReturnKind::Simple, ReturnKind::Log] {
            let label = match kind {
                ReturnKind::Simple => "simple",
                ReturnKind::Log => "log",
            };
            group.bench_with_input(BenchmarkId::new(label, size), &prices, |b, prices| {
                b.iter(|| {
                    historical_volatility(black_box(prices), kind, TRADING_DAYS_PER_YEAR)
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_norm_cdf, bench_historical_volatility);
criterion_main!(benches);

//! Benchmarks for model fitting and the full evaluation loop.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crime_forecast::config::ModelsConfig;
use crime_forecast::core::DailySeries;
use crime_forecast::evaluation::Evaluator;
use crime_forecast::models::exponential::{HoltLinear, HoltWintersSeasonal};
use crime_forecast::models::{Forecaster, ModelRegistry};
use crime_forecast::split::{split, SplitPolicy, WindowLabel};

fn generate_counts(start: NaiveDate, n: usize) -> DailySeries {
    let counts = (0..n)
        .map(|i| {
            let annual = 4.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.0).sin();
            let weekly = [0.0, 1.0, 2.0, 2.0, 1.0, 0.0, 3.0][i % 7];
            (20.0 + annual + weekly).round() as u64
        })
        .collect();
    DailySeries::from_counts(start, counts)
}

fn bench_fit(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2017, 3, 14).unwrap();
    let mut group = c.benchmark_group("fit");

    for size in [365, 730, 1460].iter() {
        let series = generate_counts(start, *size);

        group.bench_with_input(BenchmarkId::new("HoltLinear", size), size, |b, _| {
            let model = HoltLinear::new();
            b.iter(|| model.fit(black_box(series.view())))
        });

        group.bench_with_input(BenchmarkId::new("HoltWintersSeasonal", size), size, |b, _| {
            let model = HoltWintersSeasonal::annual();
            b.iter(|| model.fit(black_box(series.view())))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2017, 3, 14).unwrap();
    let series = generate_counts(start, 1830);
    let policy = SplitPolicy::pre_lockdown_backtest();
    let splits = split(&series, &policy).unwrap();
    let registry = ModelRegistry::baselines(&ModelsConfig::default()).unwrap();
    let evaluator = Evaluator::new(registry);

    c.bench_function("evaluate_baselines", |b| {
        b.iter(|| evaluator.evaluate(black_box(&splits), &[WindowLabel::Validate, WindowLabel::Test]))
    });
}

criterion_group!(benches, bench_fit, bench_evaluate);
criterion_main!(benches);

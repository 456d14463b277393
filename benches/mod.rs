//! Criterion benchmarks for pricing, inversion and Greeks.

use criterion::{Criterion, criterion_group, criterion_main};
use impliedvol_rs::prelude::*;
use std::hint::black_box;

fn short_dated_call() -> OptionQuote {
    OptionQuote::call(4405.75, 4500.0, 1.0 / 365.0, 0.02388, 0.0035)
}

fn bench_pricing(c: &mut Criterion) {
    let quote = short_dated_call();
    let mut group = c.benchmark_group("pricing");

    group.bench_function("black_scholes_price", |b| {
        b.iter(|| BlackScholes.price(black_box(&quote), black_box(0.12)))
    });
    group.bench_function("black76_price", |b| {
        b.iter(|| Black76.price(black_box(&quote), black_box(0.12)))
    });
    group.bench_function("black_scholes_vega", |b| {
        b.iter(|| BlackScholes.vega(black_box(&quote), black_box(0.12)))
    });

    group.finish();
}

fn bench_solvers(c: &mut Criterion) {
    let quote = short_dated_call();
    let config = SolverConfig::default();
    // Fifty percent out of the money with under nine hours left
    let hostile = OptionQuote::call(100.0, 150.0, 0.001, 0.0, 0.01);
    let mut group = c.benchmark_group("solvers");

    group.bench_function("solve_iv_newton_path", |b| {
        b.iter(|| solve_iv(&Model::BlackScholes, black_box(&quote), &config))
    });
    group.bench_function("solve_iv_bisection_fallback", |b| {
        b.iter(|| solve_iv(&Model::BlackScholes, black_box(&hostile), &config))
    });
    group.bench_function("solve_iv_brent", |b| {
        b.iter(|| solve_iv_brent(&Model::BlackScholes, black_box(&quote), &config))
    });

    group.finish();
}

fn bench_greeks(c: &mut Criterion) {
    let quote = short_dated_call();

    c.bench_function("greeks", |b| {
        b.iter(|| greeks(black_box(&quote), black_box(0.1218)))
    });
}

criterion_group!(benches, bench_pricing, bench_solvers, bench_greeks);
criterion_main!(benches);

//! Benchmark for the recovery combinators and transparency views.
//!
//! Measures the per-invocation overhead a wrapper adds on the success
//! path and the cost of the recovery path itself.

use criterion::{Criterion, criterion_group, criterion_main};
use fnwrap::recover::{Recover, Transparent};
use std::hint::black_box;

fn parse(text: &str) -> Result<u64, std::num::ParseIntError> {
    text.parse::<u64>()
}

fn benchmark_recover_success_path(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("recover_success_path");

    group.bench_function("bare", |bencher| {
        bencher.iter(|| black_box(parse(black_box("123456"))));
    });

    group.bench_function("or_return", |bencher| {
        let wrapped = parse.or_return(0);
        bencher.iter(|| black_box(wrapped(black_box("123456"))));
    });

    group.bench_function("or_else", |bencher| {
        let wrapped = parse.or_else(|text: &str| Ok::<_, ()>(text.len() as u64));
        bencher.iter(|| black_box(wrapped(black_box("123456"))));
    });

    group.bench_function("contained", |bencher| {
        let wrapped = parse.contained();
        bencher.iter(|| black_box(wrapped(black_box("123456"))));
    });

    group.finish();
}

fn benchmark_recover_failure_path(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("recover_failure_path");

    group.bench_function("or_return", |bencher| {
        let wrapped = parse.or_return(0);
        bencher.iter(|| black_box(wrapped(black_box("not a number"))));
    });

    group.bench_function("fallback_to", |bencher| {
        let wrapped = parse.fallback_to(|text: &str| text.len() as u64);
        bencher.iter(|| black_box(wrapped(black_box("not a number"))));
    });

    group.bench_function("contained_wrap", |bencher| {
        let wrapped = parse.contained();
        bencher.iter(|| black_box(wrapped(black_box("not a number")).is_err()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_recover_success_path,
    benchmark_recover_failure_path
);
criterion_main!(benches);

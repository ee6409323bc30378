#[macro_use]
extern crate criterion;
extern crate libarith;

use criterion::{black_box, Criterion};
use libarith::{canonicalize, generate, GeneratorConfig};

const EXPRESSIONS: [&str; 3] = [
    "1/6 + 1/8",
    "(3 - 1/2) ÷ 2'1/4 × 5",
    "((7/8 + 2) × 1/3) - 1/9 + 4'2/7",
];

fn bench_generate(c: &mut Criterion) {
    let config = GeneratorConfig::new(10000, 10).seed(0);
    c.bench_function("generate_10000_bound_10", |b| {
        b.iter(|| generate(black_box(&config)))
    });
}

fn bench_canonicalize(c: &mut Criterion) {
    c.bench_function("canonicalize", |b| {
        b.iter(|| {
            for expr in EXPRESSIONS.iter() {
                let _ = canonicalize(black_box(expr));
            }
        })
    });
}

criterion_group! {
    name = generate_benches;
    config = Criterion::default().sample_size(10);
    targets = bench_generate
}
criterion_group!(canonical_benches, bench_canonicalize);
criterion_main!(generate_benches, canonical_benches);

//! Lexer benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use jsonnet_lexer::{tokenize, Lexer};

fn lexer_token_count(source: &str) -> usize {
    Lexer::new(source, None).count()
}

fn bench_lexer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = r#"{ person1: { name: "Alice", welcome: "Hello " + self.name + "!" }, person2: self.person1 { name: "Bob" } }"#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("local_binding", |b| {
        b.iter(|| lexer_token_count(black_box("local x = 42;")))
    });

    group.bench_function("object_inheritance", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_large(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_large");

    let unit = r#"
    // service definition
    local svc(name, port) = {
      name: name,
      port: port,
      replicas: if port > 8000 then 3 else 1,
      /* labels
         applied to every pod */
      labels: { app: name, tier: 'backend' },
    };
    "#;
    let source = unit.repeat(200);
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("repeated_definitions", |b| {
        b.iter(|| tokenize(black_box(&source), None).map(|tokens| tokens.len()))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer_simple, bench_lexer_large);
criterion_main!(benches);

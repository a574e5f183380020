//! Benchmarks for graph accumulation and sampling.

use std::convert::Infallible;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use semviz::graph::Triple;
use semviz::graph::builder::{build_graph, build_graph_parallel, DEFAULT_BATCH_SIZE};
use semviz::graph::sample::sample_top_k;

/// A scale-free-ish triple set: low ids are hubs.
fn synthetic_triples(count: usize) -> Vec<Triple> {
    (0..count)
        .map(|i| {
            let subject = i % 5_000;
            let object = (i * 7919) % (subject % 200 + 1);
            Triple::new(
                format!("http://ex.org/n{subject}"),
                format!("http://ex.org/p{}", i % 16),
                format!("http://ex.org/n{object}"),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let triples = synthetic_triples(50_000);

    c.bench_function("build_50k", |bench| {
        bench.iter(|| {
            black_box(
                build_graph(
                    triples.iter().cloned().map(Ok::<_, Infallible>),
                    DEFAULT_BATCH_SIZE,
                )
                .unwrap(),
            )
        })
    });
}

fn bench_build_parallel(c: &mut Criterion) {
    let triples = synthetic_triples(50_000);

    c.bench_function("build_parallel_50k", |bench| {
        bench.iter(|| black_box(build_graph_parallel(&triples, DEFAULT_BATCH_SIZE)))
    });
}

fn bench_sample(c: &mut Criterion) {
    let graph = build_graph_parallel(&synthetic_triples(50_000), DEFAULT_BATCH_SIZE);

    c.bench_function("sample_top_500", |bench| {
        bench.iter(|| black_box(sample_top_k(graph.clone(), Some(500))))
    });
}

criterion_group!(benches, bench_build, bench_build_parallel, bench_sample);
criterion_main!(benches);

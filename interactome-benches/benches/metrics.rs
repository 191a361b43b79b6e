//! Degree metric and local clustering benchmarks.
//!
//! Clustering of the highest-degree vertex dominates metric queries on
//! scale-free networks, so it is measured separately from the whole-graph
//! density and histogram passes.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use interactome_benches::{
    error::BenchSetupError,
    params::NetworkBenchParams,
    source::{hub, scale_free},
};

/// Network sizes to benchmark.
const NODE_COUNTS: &[usize] = &[200, 1_000, 4_000];

fn local_clustering_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("local_clustering_hub");
    group.sample_size(30);

    for &nodes in NODE_COUNTS {
        let graph = scale_free(nodes)?;
        let vertex = hub(&graph)?;
        let params = NetworkBenchParams { nodes };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &(&graph, vertex.as_str()),
            |b, &(network, hub_vertex)| {
                b.iter(|| network.local_clustering(black_box(hub_vertex)));
            },
        );
    }

    group.finish();
    Ok(())
}

fn degree_summary_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("degree_summary");

    for &nodes in NODE_COUNTS {
        let graph = scale_free(nodes)?;
        let top = graph.max_degree()?.degree();
        let params = NetworkBenchParams { nodes };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &(&graph, top),
            |b, &(network, highest)| {
                b.iter(|| {
                    black_box(network.density());
                    black_box(network.degree_histogram(1, black_box(highest)));
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn local_clustering(c: &mut Criterion) {
    if let Err(err) = local_clustering_impl(c) {
        panic!("local_clustering benchmark setup failed: {err}");
    }
}

fn degree_summary(c: &mut Criterion) {
    if let Err(err) = degree_summary_impl(c) {
        panic!("degree_summary benchmark setup failed: {err}");
    }
}

criterion_group!(benches, local_clustering, degree_summary);
criterion_main!(benches);

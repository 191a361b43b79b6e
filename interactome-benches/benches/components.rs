//! Connected component extraction benchmarks.
//!
//! Labelling walks every matrix row, so the cost grows with the square of the
//! vertex count regardless of how sparse the network is.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use interactome_benches::{error::BenchSetupError, params::NetworkBenchParams, source::scale_free};

const NODE_COUNTS: &[usize] = &[200, 1_000, 4_000];

fn extract_all_components_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("extract_all_components");
    group.sample_size(20);

    for &nodes in NODE_COUNTS {
        let graph = scale_free(nodes)?;
        let params = NetworkBenchParams { nodes };

        group.bench_with_input(BenchmarkId::from_parameter(&params), &graph, |b, network| {
            b.iter(|| black_box(network).extract_all_components());
        });
    }

    group.finish();
    Ok(())
}

fn extract_all_components(c: &mut Criterion) {
    if let Err(err) = extract_all_components_impl(c) {
        panic!("extract_all_components benchmark setup failed: {err}");
    }
}

criterion_group!(benches, extract_all_components);
criterion_main!(benches);

//! Seeded synthetic networks shared by the benchmarks.

use interactome_core::{Interactome, seeded_rng};

use crate::error::BenchSetupError;

/// Seed used for every synthetic network.
pub const SEED: u64 = 42;

/// Grows a Barabasi-Albert network with `nodes` vertices from [`SEED`].
///
/// # Errors
/// Returns [`BenchSetupError::Network`] when `nodes` is below two.
pub fn scale_free(nodes: usize) -> Result<Interactome, BenchSetupError> {
    Ok(Interactome::barabasi_albert(nodes, &mut seeded_rng(SEED))?)
}

/// Picks a vertex of maximum degree, the most expensive clustering query.
///
/// # Errors
/// Returns [`BenchSetupError::EmptyNetwork`] when `graph` has no vertices.
pub fn hub(graph: &Interactome) -> Result<String, BenchSetupError> {
    let empty = || BenchSetupError::EmptyNetwork {
        model: graph.name().to_owned(),
    };
    let max = graph.max_degree().map_err(|_| empty())?;
    max.vertices().first().cloned().ok_or_else(empty)
}

//! Benchmark parameter types.

use std::fmt;

/// Parameters for a benchmark over a generated network.
#[derive(Clone, Debug)]
pub struct NetworkBenchParams {
    /// Number of vertices requested from the generator.
    pub nodes: usize,
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.nodes)
    }
}

/// Parameters for an Erdos-Renyi generation run.
#[derive(Clone, Debug)]
pub struct ErdosRenyiBenchParams {
    /// Number of candidate vertices.
    pub nodes: usize,
    /// Probability of keeping each pair.
    pub probability: f64,
}

impl fmt::Display for ErdosRenyiBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},p={}", self.nodes, self.probability)
    }
}

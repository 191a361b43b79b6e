//! Benchmark setup error type.

use interactome_core::InteractomeError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Generating or querying a network failed.
    #[error("network setup failed: {0}")]
    Network(#[from] InteractomeError),
    /// A generated network had no vertices to query.
    #[error("generated network `{model}` has no vertices")]
    EmptyNetwork {
        /// Generator that produced the network.
        model: String,
    },
}

//! Interactome graph engine.
//!
//! Loads protein-protein interaction networks from the flat
//! `<count>` / `<a> <b>` text format into a [`Interactome`] store that keeps
//! three representations in sync: the de-duplicated edge list, the
//! first-endpoint adjacency mapping, and the symmetric adjacency matrix.
//!
//! # Cost model
//!
//! Degree lookups are constant time. [`Interactome::local_clustering`] scans
//! the edge list once and then checks every neighbour pair, so it costs
//! `O(|E| + k^2)` for a vertex of degree `k`. Component extraction walks the
//! dense matrix rows, `O(|V|^2)` for the whole graph. Callers processing large
//! networks should batch those queries accordingly.
//!
//! # Example
//! ```
//! use std::io::Cursor;
//! use interactome_core::Interactome;
//!
//! let raw = "3\nA B\nB C\nC A\n";
//! let graph = Interactome::from_reader("triangle", Cursor::new(raw))?;
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! assert_eq!(graph.local_clustering("A")?, 1.0);
//! # Ok::<(), interactome_core::InteractomeError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod components;
mod error;
#[cfg(feature = "generators")]
mod generators;
mod graph;
mod loader;
mod matrix;
mod metrics;
mod validate;
mod writer;

#[cfg(test)]
mod test_utils;

pub use crate::{
    components::{ComponentId, Components},
    error::{
        FormatError, FormatErrorCode, InteractomeError, InteractomeErrorCode, InvariantViolation,
        Result,
    },
    graph::{AdjacencyMapping, Interactome, Interaction},
    loader::LoadReport,
    matrix::AdjacencyMatrix,
    metrics::{MAX_HISTOGRAM_BINS, MaxDegree},
    validate::{check_interaction_file, is_interaction_file, read_lines, validate_lines},
};

#[cfg(feature = "generators")]
#[cfg_attr(docsrs, doc(cfg(feature = "generators")))]
pub use crate::generators::{GENERATED_NAME_LENGTH, seeded_rng};

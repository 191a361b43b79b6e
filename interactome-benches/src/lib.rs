//! Benchmark support crate for interactome.
//!
//! Builds seeded synthetic networks and names the parameters used by the
//! Criterion benchmarks for degree metrics, component extraction, and random
//! network generation.

pub mod error;
pub mod params;
pub mod source;

//! Random graph generators.
//!
//! Every generator produces raw pairs and hands them to the same loader
//! routine as file input, so generated stores obey the same invariants.
//! Randomness is injected; [`seeded_rng`] gives reproducible graphs.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, field::Empty, info, instrument};

use crate::{
    error::{InteractomeError, Result},
    graph::Interactome,
    loader::EdgeCollection,
};

/// Length of the names drawn for vertices added by preferential growth.
pub const GENERATED_NAME_LENGTH: usize = 5;

const MIN_BARABASI_ALBERT_VERTICES: usize = 2;

/// Deterministic random source for the generators.
///
/// The same seed reproduces the same graph for a given crate version and
/// platform.
///
/// # Examples
/// ```
/// use interactome_core::{Interactome, seeded_rng};
///
/// let first = Interactome::erdos_renyi(12, 0.4, &mut seeded_rng(7))?;
/// let second = Interactome::erdos_renyi(12, 0.4, &mut seeded_rng(7))?;
/// assert_eq!(first.interactions(), second.interactions());
/// # Ok::<(), interactome_core::InteractomeError>(())
/// ```
#[must_use]
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Working state for preferential attachment.
///
/// Degrees are keyed by name so a full scan visits vertices in canonical
/// order.
struct PreferentialGrowth {
    pairs: Vec<(String, String)>,
    degrees: BTreeMap<String, usize>,
    edges: usize,
}

impl PreferentialGrowth {
    fn seeded(first: String, second: String) -> Self {
        let degrees = BTreeMap::from([(first.clone(), 1), (second.clone(), 1)]);
        Self {
            pairs: vec![(first, second)],
            degrees,
            edges: 1,
        }
    }

    fn from_graph(graph: &Interactome) -> Self {
        Self {
            pairs: graph
                .interactions()
                .iter()
                .map(|edge| (edge.source().to_owned(), edge.target().to_owned()))
                .collect(),
            degrees: graph
                .degree_sequence()
                .map(|(vertex, degree)| (vertex.to_owned(), degree))
                .collect(),
            edges: graph.edge_count(),
        }
    }

    /// Scans every present vertex, attaching `vertex` to each with
    /// probability `(d(k) + 1) / (2|E| + |V|)`, until at least one link forms.
    fn attach<R: Rng + ?Sized>(&mut self, vertex: String, rng: &mut R) {
        let present = self.degrees.len();
        let mut attached = 0;
        while attached == 0 {
            for (candidate, degree) in &mut self.degrees {
                let denominator = (2 * self.edges + present) as f64;
                let probability = ((*degree + 1) as f64 / denominator).min(1.0);
                if rng.gen_bool(probability) {
                    self.pairs.push((vertex.clone(), candidate.clone()));
                    *degree += 1;
                    self.edges += 1;
                    attached += 1;
                }
            }
        }
        self.degrees.insert(vertex, attached);
    }

    fn contains(&self, vertex: &str) -> bool {
        self.degrees.contains_key(vertex)
    }

    fn into_collection(self) -> EdgeCollection {
        EdgeCollection::from_pairs(self.pairs)
    }
}

impl Interactome {
    /// Erdos-Renyi graph over vertices `"1"..="nodes"`, keeping each of the
    /// `C(nodes, 2)` pairs independently with `probability`.
    ///
    /// Vertices that end up without an interaction are not part of the
    /// resulting store.
    ///
    /// # Errors
    /// Returns [`InteractomeError::InvalidProbability`] when `probability` is
    /// not a finite value in `[0, 1]`.
    #[instrument(
        name = "core.generate.erdos_renyi",
        err,
        skip(rng),
        fields(interactions = Empty),
    )]
    pub fn erdos_renyi<R: Rng + ?Sized>(nodes: usize, probability: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(InteractomeError::InvalidProbability { probability });
        }

        let mut pairs = Vec::new();
        for left in 1..=nodes {
            for right in (left + 1)..=nodes {
                if rng.gen_bool(probability) {
                    pairs.push((left.to_string(), right.to_string()));
                }
            }
        }

        let graph = Self::from_pairs("erdos-renyi", pairs);
        debug_assert!(graph.load_report().is_clean(), "generator produced rejected pairs");
        Span::current().record("interactions", graph.edge_count());
        record_generated(graph.name());
        info!(vertices = graph.vertex_count(), "random graph generated");
        Ok(graph)
    }

    /// Barabasi-Albert preferential-attachment graph over vertices
    /// `"1"..="nodes"`.
    ///
    /// The first two vertices are joined by one interaction; every later
    /// vertex attaches to at least one earlier vertex.
    ///
    /// # Errors
    /// Returns [`InteractomeError::InvalidVertexCount`] when `nodes < 2`.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::{Interactome, seeded_rng};
    ///
    /// let graph = Interactome::barabasi_albert(50, &mut seeded_rng(1))?;
    /// assert_eq!(graph.vertex_count(), 50);
    /// assert_eq!(graph.component_sizes().0, 1);
    /// # Ok::<(), interactome_core::InteractomeError>(())
    /// ```
    #[instrument(
        name = "core.generate.barabasi_albert",
        err,
        skip(rng),
        fields(interactions = Empty),
    )]
    pub fn barabasi_albert<R: Rng + ?Sized>(nodes: usize, rng: &mut R) -> Result<Self> {
        if nodes < MIN_BARABASI_ALBERT_VERTICES {
            return Err(InteractomeError::InvalidVertexCount {
                requested: nodes,
                minimum: MIN_BARABASI_ALBERT_VERTICES,
            });
        }

        let mut growth = PreferentialGrowth::seeded("1".to_owned(), "2".to_owned());
        for vertex in 3..=nodes {
            growth.attach(vertex.to_string(), rng);
        }

        let graph = Self::from_collection("barabasi-albert".into(), growth.into_collection());
        debug_assert!(graph.load_report().is_clean(), "generator produced rejected pairs");
        Span::current().record("interactions", graph.edge_count());
        record_generated(graph.name());
        info!(vertices = graph.vertex_count(), "random graph generated");
        Ok(graph)
    }

    /// Adds `count` new vertices by preferential attachment, rebuilding every
    /// representation once all of them are attached.
    ///
    /// New vertices get [`GENERATED_NAME_LENGTH`] random uppercase letters,
    /// redrawn until the name is unused.
    ///
    /// # Errors
    /// Returns [`InteractomeError::DegenerateGraph`] when the store has no
    /// vertices to attach to.
    #[instrument(
        name = "core.grow",
        err,
        skip(self, rng),
        fields(source = %self.name(), interactions = Empty),
    )]
    pub fn grow_preferentially<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        if self.vertex_count() == 0 {
            return Err(InteractomeError::DegenerateGraph {
                operation: "grow_preferentially",
                vertices: 0,
                required: 1,
            });
        }

        let mut growth = PreferentialGrowth::from_graph(self);
        for _ in 0..count {
            let vertex = draw_unused_name(&growth, rng);
            growth.attach(vertex, rng);
        }

        self.rebuild(growth.into_collection());
        debug_assert!(self.load_report().is_clean(), "growth produced rejected pairs");
        Span::current().record("interactions", self.edge_count());
        record_generated("preferential-growth");
        info!(vertices = self.vertex_count(), "interactome grown");
        Ok(())
    }
}

#[cfg(feature = "metrics")]
fn record_generated(model: &str) {
    metrics::counter!("interactome_graphs_generated_total", "model" => model.to_owned()).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_generated(_model: &str) {}

fn draw_unused_name<R: Rng + ?Sized>(growth: &PreferentialGrowth, rng: &mut R) -> String {
    loop {
        let name: String = (0..GENERATED_NAME_LENGTH)
            .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
            .collect();
        if !growth.contains(&name) {
            return name;
        }
    }
}

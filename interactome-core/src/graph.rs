//! The Graph Store: edge list, adjacency mapping, and matrix kept in sync.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt,
    io::{BufReader, Read},
    path::Path,
    sync::Arc,
};

use tracing::{Span, field::Empty, info, instrument};

use crate::{
    error::{FormatError, InteractomeError, InvariantViolation, Result},
    loader::{EdgeCollection, LoadReport, parse_pairs},
    matrix::AdjacencyMatrix,
    validate::{read_lines, read_path, validate_lines},
};

/// An undirected interaction between two distinct vertices.
///
/// The orientation is the first one seen in the source; `a b` and `b a`
/// describe the same interaction.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Interaction {
    source: String,
    target: String,
}

impl Interaction {
    pub(crate) fn new(source: String, target: String) -> Self {
        Self { source, target }
    }

    /// First endpoint as recorded in the source.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> &str { &self.source }

    /// Second endpoint as recorded in the source.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> &str { &self.target }

    /// Returns the endpoint opposite `vertex`, or `None` when `vertex` is not
    /// an endpoint.
    #[must_use]
    pub fn other(&self, vertex: &str) -> Option<&str> {
        if self.source == vertex {
            Some(&self.target)
        } else if self.target == vertex {
            Some(&self.source)
        } else {
            None
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.target)
    }
}

/// Neighbours recorded under the first endpoint of each interaction.
///
/// The mapping is not symmetrised: an interaction `a b` lists
/// `b` under `a` only. Use [`Interactome::neighbors_of`] or
/// [`Interactome::incident_neighbors`] for full neighbourhoods.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyMapping {
    entries: BTreeMap<String, Vec<String>>,
}

impl AdjacencyMapping {
    pub(crate) fn record(&mut self, source: &str, target: &str) {
        self.entries
            .entry(source.to_owned())
            .or_default()
            .push(target.to_owned());
    }

    /// Neighbours recorded for `vertex` as a first endpoint.
    #[must_use]
    pub fn neighbours(&self, vertex: &str) -> Option<&[String]> {
        self.entries.get(vertex).map(Vec::as_slice)
    }

    /// Iterates entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of vertices that appear as a first endpoint.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no interaction has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory interaction network.
///
/// Holds the de-duplicated edge list, the first-endpoint adjacency mapping,
/// the symmetric adjacency matrix, and the sorted vertex list. Every
/// constructor validates its input first, so a store is consistent from the
/// moment it exists.
///
/// # Examples
/// ```
/// use interactome_core::Interactome;
///
/// let graph = Interactome::from_lines("demo", &["2", "A B", "C B"])?;
/// assert_eq!(graph.vertices(), ["A", "B", "C"]);
/// assert_eq!(graph.to_string(), "interactome demo: 3 vertices, 2 interactions");
/// # Ok::<(), interactome_core::InteractomeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Interactome {
    name: Arc<str>,
    interactions: Vec<Interaction>,
    mapping: AdjacencyMapping,
    matrix: AdjacencyMatrix,
    vertices: Vec<String>,
    index: HashMap<String, usize>,
    degrees: Vec<usize>,
    report: LoadReport,
}

impl Interactome {
    /// Loads the interaction file at `path`.
    ///
    /// The store is named after the file stem.
    ///
    /// # Errors
    /// Returns [`InteractomeError::InvalidSource`] when the file is missing,
    /// unreadable, or malformed.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::{FormatErrorCode, Interactome};
    ///
    /// let err = Interactome::from_path("/no/such/file.txt").unwrap_err();
    /// assert_eq!(err.format_code(), Some(FormatErrorCode::MissingFile));
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = path.as_ref();
        let name: Arc<str> = file
            .file_stem()
            .map_or_else(|| file.display().to_string(), |stem| stem.to_string_lossy().into_owned())
            .into();
        let lines = read_path(file).map_err(|error| invalid_source(&name, error))?;
        Self::load(name, &lines)
    }

    /// Reads and loads an interaction description from `reader`.
    ///
    /// # Errors
    /// Returns [`InteractomeError::InvalidSource`] when reading fails or the
    /// content is malformed.
    pub fn from_reader<R: Read>(name: impl Into<Arc<str>>, reader: R) -> Result<Self> {
        let source_name = name.into();
        let lines = read_lines(BufReader::new(reader))
            .map_err(|error| invalid_source(&source_name, error))?;
        Self::load(source_name, &lines)
    }

    /// Loads an interaction description already split into lines.
    ///
    /// # Errors
    /// Returns [`InteractomeError::InvalidSource`] when the lines are
    /// malformed.
    pub fn from_lines<S: AsRef<str>>(name: impl Into<Arc<str>>, lines: &[S]) -> Result<Self> {
        Self::load(name.into(), lines)
    }

    #[instrument(
        name = "core.load",
        err,
        skip(name, lines),
        fields(source = %name, lines = lines.len(), vertices = Empty, interactions = Empty),
    )]
    fn load<S: AsRef<str>>(name: Arc<str>, lines: &[S]) -> Result<Self> {
        validate_lines(lines).map_err(|error| invalid_source(&name, error))?;
        let collection = EdgeCollection::from_pairs(parse_pairs(lines));
        let graph = Self::from_collection(name, collection);

        let span = Span::current();
        span.record("vertices", graph.vertex_count());
        span.record("interactions", graph.edge_count());
        #[cfg(feature = "metrics")]
        {
            metrics::counter!("interactome_loads_total").increment(1);
            metrics::counter!("interactome_self_loops_dropped_total")
                .increment(graph.report.self_loops() as u64);
            metrics::counter!("interactome_duplicates_dropped_total")
                .increment(graph.report.duplicates() as u64);
        }
        info!(
            retained = graph.report.retained(),
            self_loops = graph.report.self_loops(),
            duplicates = graph.report.duplicates(),
            "interactome loaded"
        );
        Ok(graph)
    }

    /// Builds a store from raw pairs, canonicalising them on the way in.
    #[cfg(any(test, feature = "generators"))]
    pub(crate) fn from_pairs<I>(name: impl Into<Arc<str>>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::from_collection(name.into(), EdgeCollection::from_pairs(pairs))
    }

    /// Derives the vertex list, index, degrees, and matrix from a collection.
    pub(crate) fn from_collection(name: Arc<str>, collection: EdgeCollection) -> Self {
        let EdgeCollection {
            interactions,
            mapping,
            report,
        } = collection;

        let vertices: Vec<String> = interactions
            .iter()
            .flat_map(|edge| [edge.source(), edge.target()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let index: HashMap<String, usize> = vertices
            .iter()
            .enumerate()
            .map(|(position, vertex)| (vertex.clone(), position))
            .collect();

        let mut matrix = AdjacencyMatrix::zeroed(vertices.len());
        let mut degrees = vec![0; vertices.len()];
        for edge in &interactions {
            if let (Some(&left), Some(&right)) = (index.get(edge.source()), index.get(edge.target())) {
                matrix.connect(left, right);
                degrees[left] += 1;
                degrees[right] += 1;
            }
        }

        let graph = Self {
            name,
            interactions,
            mapping,
            matrix,
            vertices,
            index,
            degrees,
            report,
        };
        debug_assert_eq!(graph.check_invariants(), Ok(()));
        graph
    }

    /// Identifier used in log fields and messages.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// De-duplicated interactions in first-seen order.
    #[must_use]
    #[rustfmt::skip]
    pub fn interactions(&self) -> &[Interaction] { &self.interactions }

    /// First-endpoint adjacency mapping.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency_mapping(&self) -> &AdjacencyMapping { &self.mapping }

    /// Symmetric adjacency matrix over [`Self::vertices`].
    #[must_use]
    #[rustfmt::skip]
    pub fn matrix(&self) -> &AdjacencyMatrix { &self.matrix }

    /// Sorted, de-duplicated vertex names.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[String] { &self.vertices }

    /// What the loader kept and discarded while building this store.
    #[must_use]
    #[rustfmt::skip]
    pub fn load_report(&self) -> LoadReport { self.report }

    /// Whether `vertex` is part of the graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &str) -> bool {
        self.index.contains_key(vertex)
    }

    pub(crate) fn index_of(&self, vertex: &str) -> Result<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| InteractomeError::unknown_vertex(vertex))
    }

    pub(crate) fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Checks every structural invariant of the store.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found. Stores produced by the
    /// public constructors always pass.
    pub fn check_invariants(&self) -> core::result::Result<(), InvariantViolation> {
        if self.vertices.len() != self.matrix.dimension() {
            return Err(InvariantViolation::DimensionMismatch {
                vertices: self.vertices.len(),
                dimension: self.matrix.dimension(),
            });
        }
        let upper_triangle = self.matrix.upper_triangle_ones();
        if self.interactions.len() != upper_triangle {
            return Err(InvariantViolation::EdgeCountMismatch {
                edges: self.interactions.len(),
                upper_triangle,
            });
        }

        let mut seen = HashSet::with_capacity(self.interactions.len());
        for (position, edge) in self.interactions.iter().enumerate() {
            if edge.source() == edge.target() {
                return Err(InvariantViolation::SelfLoop {
                    position,
                    vertex: edge.source().to_owned(),
                });
            }
            let key = if edge.source() <= edge.target() {
                (edge.source(), edge.target())
            } else {
                (edge.target(), edge.source())
            };
            if !seen.insert(key) {
                return Err(InvariantViolation::DuplicateInteraction {
                    position,
                    source_vertex: edge.source().to_owned(),
                    target_vertex: edge.target().to_owned(),
                });
            }
        }

        let referenced = self
            .interactions
            .iter()
            .flat_map(|edge| [edge.source(), edge.target()])
            .chain(
                self.mapping
                    .iter()
                    .flat_map(|(key, values)| std::iter::once(key).chain(values.iter().map(String::as_str))),
            );
        for vertex in referenced {
            if !self.index.contains_key(vertex) {
                return Err(InvariantViolation::UnlistedVertex {
                    vertex: vertex.to_owned(),
                });
            }
        }

        match self.matrix.first_asymmetry() {
            Some((row, column)) => Err(InvariantViolation::AsymmetricMatrix { row, column }),
            None => Ok(()),
        }
    }

    /// Replaces every representation with those derived from `collection`.
    #[cfg(feature = "generators")]
    pub(crate) fn rebuild(&mut self, collection: EdgeCollection) {
        let name = Arc::clone(&self.name);
        *self = Self::from_collection(name, collection);
    }
}

impl fmt::Display for Interactome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interactome {}: {} vertices, {} interactions",
            self.name,
            self.vertices.len(),
            self.interactions.len()
        )
    }
}

fn invalid_source(name: &Arc<str>, error: FormatError) -> InteractomeError {
    InteractomeError::InvalidSource {
        source_name: Arc::clone(name),
        error,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{FormatErrorCode, InteractomeErrorCode, test_utils::suite_proptest_config};

    fn owned(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
            .collect()
    }

    #[rstest]
    fn vertices_include_target_only_endpoints() {
        let graph = Interactome::from_lines("tail", &["2", "A B", "A C"]).expect("valid lines");
        assert_eq!(graph.vertices(), ["A", "B", "C"]);
        assert!(graph.contains_vertex("C"));
        assert!(graph.adjacency_mapping().neighbours("C").is_none());
    }

    #[rstest]
    fn malformed_lines_never_reach_the_loader() {
        let err = Interactome::from_lines("bad", &["2", "A B"]).expect_err("count mismatch");
        assert_eq!(err.code(), InteractomeErrorCode::InvalidSource);
        assert_eq!(err.format_code(), Some(FormatErrorCode::LineCountMismatch));
        assert!(err.to_string().starts_with("`bad` is not a valid"));
    }

    #[rstest]
    fn reader_errors_are_reported_as_invalid_source() {
        let err = Interactome::from_reader("binary", Cursor::new(vec![b'1', b'\n', 0xff]))
            .expect_err("invalid UTF-8");
        assert_eq!(err.format_code(), Some(FormatErrorCode::Unreadable));
    }

    #[rstest]
    fn from_path_uses_file_stem_as_name() {
        let dir = tempfile::tempdir().expect("tempdir must be creatable");
        let path = dir.path().join("yeast.txt");
        std::fs::write(&path, "1\nA B\n").expect("temp file must be writable");
        let graph = Interactome::from_path(&path).expect("valid file");
        assert_eq!(graph.name(), "yeast");
    }

    #[rstest]
    fn graph_of_only_self_loops_is_empty() {
        let graph = Interactome::from_lines("loops", &["2", "A A", "B B"]).expect("valid lines");
        assert_eq!(graph.vertices().len(), 0);
        assert_eq!(graph.matrix().dimension(), 0);
        assert_eq!(graph.load_report().self_loops(), 2);
        assert_eq!(graph.check_invariants(), Ok(()));
    }

    #[rstest]
    fn check_invariants_reports_corruption() {
        let mut graph = Interactome::from_pairs("corrupt", owned(&[("A", "B"), ("B", "C")]));
        graph
            .interactions
            .push(Interaction::new("C".to_owned(), "B".to_owned()));
        assert_eq!(
            graph.check_invariants(),
            Err(InvariantViolation::EdgeCountMismatch {
                edges: 3,
                upper_triangle: 2,
            })
        );

        let mut graph = Interactome::from_pairs("unlisted", owned(&[("A", "B")]));
        graph.mapping.record("A", "Z");
        assert_eq!(
            graph.check_invariants(),
            Err(InvariantViolation::UnlistedVertex {
                vertex: "Z".to_owned(),
            })
        );
    }

    #[rstest]
    fn interaction_other_endpoint() {
        let edge = Interaction::new("A".to_owned(), "B".to_owned());
        assert_eq!(edge.other("A"), Some("B"));
        assert_eq!(edge.other("B"), Some("A"));
        assert_eq!(edge.other("C"), None);
        assert_eq!(edge.to_string(), "A B");
    }

    fn raw_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
        let vertex = prop::sample::select(vec!["A", "B", "C", "D", "E", "F", "G", "H"])
            .prop_map(str::to_owned);
        prop::collection::vec((vertex.clone(), vertex), 1..40)
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn stores_built_from_arbitrary_pairs_are_consistent(pairs in raw_pairs()) {
            let raw = pairs.len();
            let graph = Interactome::from_pairs("prop", pairs);
            prop_assert_eq!(graph.check_invariants(), Ok(()));
            prop_assert_eq!(graph.matrix().upper_triangle_ones(), graph.interactions().len());

            let report = graph.load_report();
            prop_assert_eq!(report.retained() + report.self_loops() + report.duplicates(), raw);

            for edge in graph.interactions() {
                prop_assert_ne!(edge.source(), edge.target());
                let reversed = graph
                    .interactions()
                    .iter()
                    .filter(|other| other.source() == edge.target() && other.target() == edge.source())
                    .count();
                prop_assert_eq!(reversed, 0);
            }
        }

        #[test]
        fn mapping_records_each_interaction_once(pairs in raw_pairs()) {
            let graph = Interactome::from_pairs("prop", pairs);
            let recorded: usize = graph.adjacency_mapping().iter().map(|(_, values)| values.len()).sum();
            prop_assert_eq!(recorded, graph.interactions().len());
            for edge in graph.interactions() {
                let listed = graph
                    .adjacency_mapping()
                    .neighbours(edge.source())
                    .map_or(0, |values| values.iter().filter(|v| *v == edge.target()).count());
                prop_assert_eq!(listed, 1);
            }
        }
    }
}

//! Degree, density, and clustering statistics.

use crate::{
    error::{InteractomeError, Result},
    graph::Interactome,
};

/// Largest number of bins [`Interactome::degree_histogram`] will list.
pub const MAX_HISTOGRAM_BINS: usize = 1 << 20;

/// Highest degree in a graph together with every vertex attaining it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxDegree {
    degree: usize,
    vertices: Vec<String>,
}

impl MaxDegree {
    /// The maximum degree.
    #[must_use]
    #[rustfmt::skip]
    pub fn degree(&self) -> usize { self.degree }

    /// Vertices with the maximum degree, in canonical order.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[String] { &self.vertices }
}

impl Interactome {
    /// Number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Number of de-duplicated interactions.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.interactions().len()
    }

    /// Number of interactions incident to `vertex`.
    ///
    /// # Errors
    /// Returns [`InteractomeError::UnknownVertex`] when `vertex` is not part of
    /// the graph.
    pub fn degree(&self, vertex: &str) -> Result<usize> {
        let position = self.index_of(vertex)?;
        Ok(self.degrees()[position])
    }

    /// Maximum degree and every vertex achieving it.
    ///
    /// # Errors
    /// Returns [`InteractomeError::DegenerateGraph`] for a graph without
    /// vertices.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::Interactome;
    ///
    /// let graph = Interactome::from_lines("star", &["3", "H A", "H B", "C D"])?;
    /// let max = graph.max_degree()?;
    /// assert_eq!(max.degree(), 2);
    /// assert_eq!(max.vertices(), ["H"]);
    /// # Ok::<(), interactome_core::InteractomeError>(())
    /// ```
    pub fn max_degree(&self) -> Result<MaxDegree> {
        let degree = self
            .degrees()
            .iter()
            .copied()
            .max()
            .ok_or_else(|| self.degenerate("max_degree", 1))?;
        let vertices = self
            .vertices()
            .iter()
            .zip(self.degrees())
            .filter(|(_, d)| **d == degree)
            .map(|(vertex, _)| vertex.clone())
            .collect();
        Ok(MaxDegree { degree, vertices })
    }

    /// Mean degree over all vertices.
    ///
    /// # Errors
    /// Returns [`InteractomeError::DegenerateGraph`] for a graph without
    /// vertices.
    pub fn average_degree(&self) -> Result<f64> {
        if self.vertex_count() == 0 {
            return Err(self.degenerate("average_degree", 1));
        }
        let total: usize = self.degrees().iter().sum();
        Ok(total as f64 / self.vertex_count() as f64)
    }

    /// Number of vertices whose degree is exactly `degree`.
    #[must_use]
    pub fn count_degree(&self, degree: usize) -> usize {
        self.degrees().iter().filter(|d| **d == degree).count()
    }

    /// `(degree, count)` for every degree in `min..=max`, zeros included.
    ///
    /// Empty when `min > max`.
    ///
    /// # Errors
    /// Returns [`InteractomeError::HistogramRangeTooLarge`] when the range
    /// spans more than [`MAX_HISTOGRAM_BINS`] degrees.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::Interactome;
    ///
    /// let graph = Interactome::from_lines("path", &["2", "A B", "B C"])?;
    /// assert_eq!(graph.degree_histogram(0, 3)?, [(0, 0), (1, 2), (2, 1), (3, 0)]);
    /// assert!(graph.degree_histogram(3, 1)?.is_empty());
    /// # Ok::<(), interactome_core::InteractomeError>(())
    /// ```
    pub fn degree_histogram(&self, min: usize, max: usize) -> Result<Vec<(usize, usize)>> {
        let Some(span) = max.checked_sub(min) else {
            return Ok(Vec::new());
        };
        if span >= MAX_HISTOGRAM_BINS {
            return Err(InteractomeError::HistogramRangeTooLarge {
                min,
                max,
                limit: MAX_HISTOGRAM_BINS,
            });
        }
        Ok((min..=max)
            .map(|degree| (degree, self.count_degree(degree)))
            .collect())
    }

    /// Ratio of realised to possible interactions, `2|E| / (|V|(|V|-1))`.
    ///
    /// # Errors
    /// Returns [`InteractomeError::DegenerateGraph`] when the graph has fewer
    /// than two vertices.
    pub fn density(&self) -> Result<f64> {
        let vertices = self.vertex_count();
        if vertices < 2 {
            return Err(self.degenerate("density", 2));
        }
        let possible = vertices as f64 * (vertices - 1) as f64;
        Ok(2.0 * self.edge_count() as f64 / possible)
    }

    /// Neighbours of `vertex` found by scanning the edge list, in edge-list
    /// order.
    ///
    /// # Errors
    /// Returns [`InteractomeError::UnknownVertex`] when `vertex` is not part of
    /// the graph.
    pub fn incident_neighbors(&self, vertex: &str) -> Result<Vec<&str>> {
        self.index_of(vertex)?;
        Ok(self
            .interactions()
            .iter()
            .filter_map(|edge| edge.other(vertex))
            .collect())
    }

    /// Fraction of `vertex`'s neighbour pairs that interact with each other.
    ///
    /// Returns `0.0` for vertices of degree one.
    ///
    /// # Errors
    /// Returns [`InteractomeError::UnknownVertex`] when `vertex` is not part of
    /// the graph.
    pub fn local_clustering(&self, vertex: &str) -> Result<f64> {
        let neighbours = self.incident_neighbors(vertex)?;
        let k = neighbours.len();
        if k <= 1 {
            return Ok(0.0);
        }

        let positions = neighbours
            .iter()
            .map(|neighbour| self.index_of(neighbour))
            .collect::<Result<Vec<_>>>()?;
        let mut ordered_links = 0usize;
        for &row in &positions {
            for &column in &positions {
                if self.matrix().is_adjacent(row, column) {
                    ordered_links += 1;
                }
            }
        }
        Ok(ordered_links as f64 / (k * (k - 1)) as f64)
    }

    /// Degree of every vertex in canonical order, paired with its name.
    pub fn degree_sequence(&self) -> impl Iterator<Item = (&str, usize)> {
        self.vertices()
            .iter()
            .map(String::as_str)
            .zip(self.degrees().iter().copied())
    }

    fn degenerate(&self, operation: &'static str, required: usize) -> InteractomeError {
        InteractomeError::DegenerateGraph {
            operation,
            vertices: self.vertex_count(),
            required,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{InteractomeErrorCode, test_utils::suite_proptest_config};

    #[fixture]
    fn toy() -> Interactome {
        Interactome::from_reader(
            "toy",
            interactome_test_support::fixtures::TOY_INTERACTOME.as_bytes(),
        )
        .expect("toy fixture is valid")
    }

    #[rstest]
    #[case("A", 3)]
    #[case("B", 4)]
    #[case("D", 3)]
    #[case("E", 1)]
    #[case("G", 3)]
    fn degree_counts_both_positions(toy: Interactome, #[case] vertex: &str, #[case] expected: usize) {
        assert_eq!(toy.degree(vertex), Ok(expected));
    }

    #[rstest]
    fn unknown_vertices_are_rejected(toy: Interactome) {
        for result in [
            toy.degree("Z").map(|_| ()),
            toy.local_clustering("Z").map(|_| ()),
            toy.incident_neighbors("Z").map(|_| ()),
        ] {
            assert_eq!(result.map_err(|err| err.code()), Err(InteractomeErrorCode::UnknownVertex));
        }
    }

    #[rstest]
    fn max_degree_reports_ties() {
        let graph = Interactome::from_lines("ties", &["2", "A B", "C D"]).expect("valid lines");
        let max = graph.max_degree().expect("non-empty graph");
        assert_eq!(max.degree(), 1);
        assert_eq!(max.vertices(), ["A", "B", "C", "D"]);
    }

    #[rstest]
    fn toy_summary_statistics(toy: Interactome) {
        let max = toy.max_degree().expect("non-empty graph");
        assert_eq!(max.degree(), 4);
        assert_eq!(max.vertices(), ["B"]);
        let average = toy.average_degree().expect("non-empty graph");
        assert!((average - 18.0 / 7.0).abs() < 1e-12);
        assert_eq!(toy.count_degree(3), 4);
        assert_eq!(
            toy.degree_histogram(1, 4),
            Ok(vec![(1, 2), (2, 0), (3, 4), (4, 1)])
        );
    }

    #[rstest]
    #[case::whole_usize(0, usize::MAX)]
    #[case::one_past_limit(5, 5 + MAX_HISTOGRAM_BINS)]
    fn oversized_histogram_ranges_are_rejected(toy: Interactome, #[case] min: usize, #[case] max: usize) {
        assert_eq!(
            toy.degree_histogram(min, max),
            Err(InteractomeError::HistogramRangeTooLarge {
                min,
                max,
                limit: MAX_HISTOGRAM_BINS,
            })
        );
    }

    #[rstest]
    fn histogram_at_the_limit_is_listed(toy: Interactome) {
        let bins = toy
            .degree_histogram(1, MAX_HISTOGRAM_BINS)
            .expect("range holds exactly the limit");
        assert_eq!(bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|(_, count)| count).sum::<usize>(), 7);
    }

    #[rstest]
    fn empty_graph_statistics_are_degenerate() {
        let graph = Interactome::from_lines("loops", &["1", "A A"]).expect("valid lines");
        for err in [
            graph.max_degree().map(|_| ()).expect_err("no vertices"),
            graph.average_degree().map(|_| ()).expect_err("no vertices"),
            graph.density().map(|_| ()).expect_err("no vertices"),
        ] {
            assert_eq!(err.code(), InteractomeErrorCode::DegenerateGraph);
        }
        assert_eq!(graph.degree_histogram(0, 0), Ok(vec![(0, 0)]));
    }

    #[rstest]
    fn density_of_single_edge_is_one() {
        let graph = Interactome::from_lines("pair", &["1", "A B"]).expect("valid lines");
        assert_eq!(graph.density(), Ok(1.0));
    }

    #[rstest]
    #[case("A", 1.0)]
    #[case("D", 0.0)]
    #[case("E", 0.0)]
    #[case("B", 0.5)]
    fn toy_clustering(toy: Interactome, #[case] vertex: &str, #[case] expected: f64) {
        let value = toy.local_clustering(vertex).expect("known vertex");
        assert!((value - expected).abs() < 1e-12, "{vertex}: {value}");
    }

    #[rstest]
    fn incident_neighbors_follow_edge_list_order(toy: Interactome) {
        assert_eq!(toy.incident_neighbors("D"), Ok(vec!["B", "E", "F"]));
        assert_eq!(toy.incident_neighbors("A"), Ok(vec!["B", "C", "G"]));
    }

    fn vertex_set(graph: &Interactome) -> HashSet<&str> {
        graph.vertices().iter().map(String::as_str).collect()
    }

    fn raw_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
        let vertex = (0u8..10).prop_map(|id| format!("P{id}"));
        prop::collection::vec((vertex.clone(), vertex), 1..45)
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn clustering_is_zero_for_low_degree(pairs in raw_pairs()) {
            let graph = Interactome::from_pairs("prop", pairs);
            for (vertex, degree) in graph.degree_sequence() {
                let value = graph.local_clustering(vertex).expect("listed vertex");
                prop_assert!((0.0..=1.0).contains(&value));
                if degree <= 1 {
                    prop_assert_eq!(value, 0.0);
                }
            }
        }

        #[test]
        fn density_is_invariant_under_relabelling(
            pairs in raw_pairs(),
            permutation in Just((0u8..10).collect::<Vec<_>>()).prop_shuffle(),
        ) {
            let relabel: HashMap<String, String> = (0u8..10)
                .map(|id| (format!("P{id}"), format!("Q{}", permutation[usize::from(id)])))
                .collect();
            let renamed: Vec<(String, String)> = pairs
                .iter()
                .map(|(a, b)| (relabel[a].clone(), relabel[b].clone()))
                .collect();

            let original = Interactome::from_pairs("original", pairs);
            let relabelled = Interactome::from_pairs("relabelled", renamed);
            prop_assert_eq!(vertex_set(&original).len(), vertex_set(&relabelled).len());
            prop_assert_eq!(original.density().ok(), relabelled.density().ok());
        }

        #[test]
        fn degrees_sum_to_twice_the_edges(pairs in raw_pairs()) {
            let graph = Interactome::from_pairs("prop", pairs);
            let total: usize = graph.degree_sequence().map(|(_, degree)| degree).sum();
            prop_assert_eq!(total, 2 * graph.edge_count());
            for (vertex, degree) in graph.degree_sequence() {
                prop_assert_eq!(graph.incident_neighbors(vertex).expect("listed vertex").len(), degree);
            }
        }
    }
}

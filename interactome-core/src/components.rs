//! Connected-component extraction over the adjacency matrix.
//!
//! Traversals are breadth-first and keep their visited set local to the call.
//! Each reached vertex scans one matrix row, so a full partition costs
//! `O(|V|^2)` on the dense matrix.

use std::{collections::VecDeque, fmt, num::NonZeroUsize};

use tracing::{info, instrument};

use crate::{error::Result, graph::Interactome};

/// Label of a connected component. Labels start at `1` and follow discovery
/// order.
///
/// # Examples
/// ```
/// use interactome_core::ComponentId;
///
/// let id = ComponentId::new(3).expect("labels start at one");
/// assert_eq!(id.get(), 3);
/// assert!(ComponentId::new(0).is_none());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ComponentId(NonZeroUsize);

impl ComponentId {
    /// Creates a label, rejecting zero.
    #[must_use]
    pub fn new(id: usize) -> Option<Self> {
        NonZeroUsize::new(id).map(Self)
    }

    /// Returns the numeric label.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> usize { self.0.get() }

    fn from_position(position: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(position))
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partition of a graph's vertices into connected components.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Components {
    vertices: Vec<String>,
    labels: Vec<ComponentId>,
    members: Vec<Vec<String>>,
}

impl Components {
    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the graph had no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Label of `vertex`, or `None` when it is not part of the graph.
    #[must_use]
    pub fn label_of(&self, vertex: &str) -> Option<ComponentId> {
        self.vertices
            .binary_search_by(|probe| probe.as_str().cmp(vertex))
            .ok()
            .and_then(|position| self.labels.get(position).copied())
    }

    /// Members of component `id` in discovery order.
    #[must_use]
    pub fn members(&self, id: ComponentId) -> Option<&[String]> {
        self.members.get(id.get() - 1).map(Vec::as_slice)
    }

    /// Every vertex paired with its label, in canonical vertex order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, ComponentId)> {
        self.vertices
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter().copied())
    }

    /// Components in label order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &[String])> {
        self.members
            .iter()
            .enumerate()
            .map(|(position, members)| (ComponentId::from_position(position), members.as_slice()))
    }

    /// `(label, size)` for every component in label order.
    #[must_use]
    pub fn sizes(&self) -> Vec<(ComponentId, usize)> {
        self.iter().map(|(id, members)| (id, members.len())).collect()
    }
}

impl Interactome {
    /// All neighbours of `vertex`, read from its matrix row in canonical
    /// order.
    ///
    /// # Errors
    /// Returns [`crate::InteractomeError::UnknownVertex`] when `vertex` is not
    /// part of the graph.
    pub fn neighbors_of(&self, vertex: &str) -> Result<Vec<&str>> {
        let row = self.index_of(vertex)?;
        Ok(self
            .matrix()
            .row_neighbours(row)
            .map(|column| self.vertices()[column].as_str())
            .collect())
    }

    /// Vertices reachable from `vertex`, starting with `vertex` itself, in
    /// discovery order.
    ///
    /// # Errors
    /// Returns [`crate::InteractomeError::UnknownVertex`] when `vertex` is not
    /// part of the graph.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::Interactome;
    ///
    /// let graph = Interactome::from_lines("split", &["3", "A B", "B C", "X Y"])?;
    /// assert_eq!(graph.extract_component("C")?, ["C", "B", "A"]);
    /// # Ok::<(), interactome_core::InteractomeError>(())
    /// ```
    pub fn extract_component(&self, vertex: &str) -> Result<Vec<&str>> {
        let start = self.index_of(vertex)?;
        let mut visited = vec![false; self.vertex_count()];
        Ok(self
            .traverse(start, &mut visited)
            .into_iter()
            .map(|position| self.vertices()[position].as_str())
            .collect())
    }

    /// Labels every vertex with its connected component.
    ///
    /// Unlabelled vertices are picked in canonical order, so labels are
    /// deterministic for a given graph.
    #[instrument(
        name = "core.components",
        skip(self),
        fields(source = %self.name(), vertices = self.vertex_count()),
    )]
    pub fn extract_all_components(&self) -> Components {
        let mut visited = vec![false; self.vertex_count()];
        let mut labels = vec![ComponentId::from_position(0); self.vertex_count()];
        let mut members = Vec::new();

        for start in 0..self.vertex_count() {
            if visited[start] {
                continue;
            }
            let id = ComponentId::from_position(members.len());
            let reached = self.traverse(start, &mut visited);
            for &position in &reached {
                labels[position] = id;
            }
            members.push(
                reached
                    .into_iter()
                    .map(|position| self.vertices()[position].clone())
                    .collect(),
            );
        }

        info!(components = members.len(), "components extracted");
        Components {
            vertices: self.vertices().to_vec(),
            labels,
            members,
        }
    }

    /// Number of components and the size of each, in label order.
    #[must_use]
    pub fn component_sizes(&self) -> (usize, Vec<(ComponentId, usize)>) {
        let sizes = self.extract_all_components().sizes();
        (sizes.len(), sizes)
    }

    fn traverse(&self, start: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut reached = Vec::new();
        let mut frontier = VecDeque::from([start]);
        visited[start] = true;
        while let Some(current) = frontier.pop_front() {
            reached.push(current);
            for next in self.matrix().row_neighbours(current) {
                if !visited[next] {
                    visited[next] = true;
                    frontier.push_back(next);
                }
            }
        }
        reached
    }
}

//! Canonicalisation of raw interaction pairs.
//!
//! Every graph, whether parsed from a file or synthesised by a generator,
//! passes through [`EdgeCollection::from_pairs`]. Self-loops are dropped and
//! only the first-seen orientation of each unordered pair is retained.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::{AdjacencyMapping, Interaction};

/// Summary of what the loader kept and discarded.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use interactome_core::Interactome;
///
/// let graph = Interactome::from_reader("demo", Cursor::new("3\nA B\nB A\nC C\n"))?;
/// let report = graph.load_report();
/// assert_eq!(report.retained(), 1);
/// assert_eq!(report.duplicates(), 1);
/// assert_eq!(report.self_loops(), 1);
/// # Ok::<(), interactome_core::InteractomeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    retained: usize,
    self_loops: usize,
    duplicates: usize,
}

impl LoadReport {
    /// Number of interactions kept in the edge list.
    #[must_use]
    #[rustfmt::skip]
    pub fn retained(&self) -> usize { self.retained }

    /// Number of `a a` pairs that were dropped.
    #[must_use]
    #[rustfmt::skip]
    pub fn self_loops(&self) -> usize { self.self_loops }

    /// Number of pairs dropped because the unordered pair was already kept.
    #[must_use]
    #[rustfmt::skip]
    pub fn duplicates(&self) -> usize { self.duplicates }

    /// Whether the loader dropped anything at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.self_loops == 0 && self.duplicates == 0
    }
}

/// De-duplicated edge list together with the first-endpoint mapping.
#[derive(Debug, Default)]
pub(crate) struct EdgeCollection {
    pub(crate) interactions: Vec<Interaction>,
    pub(crate) mapping: AdjacencyMapping,
    pub(crate) report: LoadReport,
}

impl EdgeCollection {
    /// Builds the collection from raw pairs in input order.
    pub(crate) fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut collection = Self::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for (source, target) in pairs {
            if source == target {
                debug!(vertex = source.as_str(), "dropping self-loop");
                collection.report.self_loops += 1;
                continue;
            }
            if !seen.insert(unordered_key(&source, &target)) {
                debug!(
                    first = source.as_str(),
                    second = target.as_str(),
                    "dropping duplicate interaction"
                );
                collection.report.duplicates += 1;
                continue;
            }
            collection.mapping.record(&source, &target);
            collection.interactions.push(Interaction::new(source, target));
            collection.report.retained += 1;
        }

        collection
    }
}

/// Splits validated lines (count line first) into raw pairs.
///
/// Lines are assumed to have passed [`crate::validate_lines`]; anything that
/// does not yield two tokens is skipped.
pub(crate) fn parse_pairs<S: AsRef<str>>(lines: &[S]) -> Vec<(String, String)> {
    lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let mut tokens = line.as_ref().split_whitespace();
            let source = tokens.next()?;
            let target = tokens.next()?;
            Some((source.to_owned(), target.to_owned()))
        })
        .collect()
}

fn unordered_key(left: &str, right: &str) -> (String, String) {
    if left <= right {
        (left.to_owned(), right.to_owned())
    } else {
        (right.to_owned(), left.to_owned())
    }
}

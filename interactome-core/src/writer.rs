//! Persists the de-duplicated edge list in the input format.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::{debug, instrument};

use crate::graph::Interactome;

impl Interactome {
    /// Writes `<E>` followed by one `a b` line per interaction, in edge-list
    /// order.
    ///
    /// # Errors
    /// Propagates any I/O failure from `writer`.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::Interactome;
    ///
    /// let graph = Interactome::from_lines("demo", &["3", "A B", "B A", "B C"])?;
    /// let mut out = Vec::new();
    /// graph.write_interactions(&mut out).expect("writing to a Vec cannot fail");
    /// assert_eq!(String::from_utf8_lossy(&out), "2\nA B\nB C\n");
    /// # Ok::<(), interactome_core::InteractomeError>(())
    /// ```
    pub fn write_interactions<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.edge_count())?;
        for edge in self.interactions() {
            writeln!(writer, "{edge}")?;
        }
        writer.flush()
    }

    /// Writes the edge list to a new file at `path`, replacing any existing
    /// file.
    ///
    /// # Errors
    /// Propagates failures creating or writing the file.
    #[instrument(
        name = "core.write",
        err,
        skip(self, path),
        fields(source = %self.name(), path = %path.as_ref().display(), interactions = self.edge_count()),
    )]
    pub fn write_interactions_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_interactions(BufWriter::new(file))?;
        debug!("interactions written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::suite_proptest_config;

    #[rstest]
    fn writes_retained_orientation() {
        let graph = Interactome::from_lines("orient", &["3", "D E", "E D", "A A"]).expect("valid lines");
        let mut out = Vec::new();
        graph.write_interactions(&mut out).expect("vec writes cannot fail");
        assert_eq!(out, b"1\nD E\n");
    }

    #[rstest]
    fn file_round_trip_preserves_store() {
        let dir = tempfile::tempdir().expect("tempdir must be creatable");
        let path = dir.path().join("clean.txt");
        let graph = Interactome::from_reader(
            "toy",
            interactome_test_support::fixtures::TOY_INTERACTOME.as_bytes(),
        )
        .expect("toy fixture is valid");

        graph.write_interactions_file(&path).expect("temp dir is writable");
        let reloaded = Interactome::from_path(&path).expect("written file is valid");
        assert_eq!(reloaded.interactions(), graph.interactions());
        assert_eq!(reloaded.vertices(), graph.vertices());
        assert!(reloaded.load_report().is_clean());
    }

    #[rstest]
    fn writing_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir must be creatable");
        let graph = Interactome::from_lines("pair", &["1", "A B"]).expect("valid lines");
        let err = graph
            .write_interactions_file(dir.path().join("absent").join("out.txt"))
            .expect_err("parent directory does not exist");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    fn raw_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
        let vertex = "[a-f][0-9]";
        prop::collection::vec((vertex, vertex), 1..30)
    }

    proptest! {
        #![proptest_config(suite_proptest_config(96))]

        #[test]
        fn reloading_written_graph_is_identical(pairs in raw_pairs()) {
            let graph = Interactome::from_pairs("prop", pairs);
            prop_assume!(graph.edge_count() > 0);

            let mut out = Vec::new();
            graph.write_interactions(&mut out).expect("vec writes cannot fail");
            let reloaded = Interactome::from_reader("reloaded", out.as_slice()).expect("written form is valid");

            prop_assert_eq!(reloaded.interactions(), graph.interactions());
            prop_assert_eq!(reloaded.vertices(), graph.vertices());
            prop_assert_eq!(reloaded.adjacency_mapping(), graph.adjacency_mapping());
            prop_assert_eq!(reloaded.matrix(), graph.matrix());
        }
    }
}

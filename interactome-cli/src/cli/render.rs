//! Command summaries and their text and JSON renderings.

use std::{
    collections::BTreeMap,
    fmt::Display,
    io::{self, Write},
    path::PathBuf,
};

use serde::Serialize;

use super::commands::OutputFormat;

/// Result of executing one CLI command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandSummary {
    /// Output of `stats`.
    Stats(GraphStats),
    /// Output of `histogram`.
    Histogram {
        /// Name of the loaded network.
        source: String,
        /// One bin per degree in the requested range.
        bins: Vec<HistogramBin>,
    },
    /// Output of `components`.
    Components(ComponentReport),
    /// Output of `clustering`.
    Clustering {
        /// Name of the loaded network.
        source: String,
        /// One entry per requested vertex, in request order.
        coefficients: Vec<VertexCoefficient>,
    },
    /// Output of `clean`.
    Clean(CleanReport),
    /// Output of `generate`.
    Generate(GenerationReport),
}

/// Whole-graph statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Name of the loaded network.
    pub source: String,
    /// Distinct vertices.
    pub vertices: usize,
    /// De-duplicated interactions.
    pub interactions: usize,
    /// Density, absent for graphs with fewer than two vertices.
    pub density: Option<f64>,
    /// Mean degree, absent for empty graphs.
    pub average_degree: Option<f64>,
    /// Maximum degree, absent for empty graphs.
    pub max_degree: Option<usize>,
    /// Every vertex attaining the maximum degree.
    pub max_degree_vertices: Vec<String>,
    /// Self-loops the loader discarded.
    pub self_loops_dropped: usize,
    /// Repeated pairs the loader discarded.
    pub duplicates_dropped: usize,
}

/// Number of vertices with a given degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    /// The degree.
    pub degree: usize,
    /// Vertices with exactly that degree.
    pub count: usize,
}

/// Component label per vertex and component sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReport {
    /// Name of the loaded network.
    pub source: String,
    /// Size of component `i + 1` at index `i`.
    pub sizes: Vec<usize>,
    /// Label of every vertex, keyed by vertex name.
    pub labels: BTreeMap<String, usize>,
}

/// Local clustering of one vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexCoefficient {
    /// The vertex.
    pub vertex: String,
    /// Its degree.
    pub degree: usize,
    /// Its local clustering coefficient.
    pub coefficient: f64,
}

/// Outcome of rewriting a network without duplicates and self-loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Name of the loaded network.
    pub source: String,
    /// Interactions written.
    pub interactions: usize,
    /// Self-loops left out.
    pub self_loops_dropped: usize,
    /// Repeated pairs left out.
    pub duplicates_dropped: usize,
    /// Destination file.
    pub output: PathBuf,
}

/// Outcome of generating a random network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Generator that produced the network.
    pub model: String,
    /// Seed that reproduces the network.
    pub seed: u64,
    /// Vertices with at least one interaction.
    pub vertices: usize,
    /// Generated interactions.
    pub interactions: usize,
    /// Destination file, when one was requested.
    pub output: Option<PathBuf>,
    /// Generated edge list, kept only when no destination was requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<(String, String)>,
}

/// Renders `summary` to `writer` as plain text or pretty-printed JSON.
///
/// A generated network without an output file is rendered in the interaction
/// file format, so the text output can be redirected straight into a file.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use interactome_cli::cli::{CommandSummary, HistogramBin, OutputFormat, render_summary};
///
/// let summary = CommandSummary::Histogram {
///     source: "demo".into(),
///     bins: vec![HistogramBin { degree: 1, count: 2 }],
/// };
/// let mut out = Vec::new();
/// render_summary(&summary, OutputFormat::Human, &mut out)?;
/// assert_eq!(String::from_utf8_lossy(&out), "source: demo\ndegree\tcount\n1\t2\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(
    summary: &CommandSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
        OutputFormat::Human => render_human(summary, writer),
    }
}

fn render_human(summary: &CommandSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        CommandSummary::Stats(stats) => {
            writeln!(writer, "source: {}", stats.source)?;
            writeln!(writer, "vertices: {}", stats.vertices)?;
            writeln!(writer, "interactions: {}", stats.interactions)?;
            writeln!(writer, "density: {}", optional(stats.density.map(|d| format!("{d:.4}"))))?;
            writeln!(
                writer,
                "average degree: {}",
                optional(stats.average_degree.map(|d| format!("{d:.4}")))
            )?;
            writeln!(
                writer,
                "max degree: {} ({})",
                optional(stats.max_degree),
                stats.max_degree_vertices.join(", ")
            )?;
            writeln!(
                writer,
                "dropped: {} self-loops, {} duplicates",
                stats.self_loops_dropped, stats.duplicates_dropped
            )
        }
        CommandSummary::Histogram { source, bins } => {
            writeln!(writer, "source: {source}")?;
            writeln!(writer, "degree\tcount")?;
            for bin in bins {
                writeln!(writer, "{}\t{}", bin.degree, bin.count)?;
            }
            Ok(())
        }
        CommandSummary::Components(report) => {
            writeln!(writer, "source: {}", report.source)?;
            writeln!(writer, "components: {}", report.sizes.len())?;
            for (index, size) in report.sizes.iter().enumerate() {
                writeln!(writer, "component {}\t{size}", index + 1)?;
            }
            for (vertex, label) in &report.labels {
                writeln!(writer, "{vertex}\t{label}")?;
            }
            Ok(())
        }
        CommandSummary::Clustering {
            source,
            coefficients,
        } => {
            writeln!(writer, "source: {source}")?;
            writeln!(writer, "vertex\tdegree\tclustering")?;
            for entry in coefficients {
                writeln!(
                    writer,
                    "{}\t{}\t{:.4}",
                    entry.vertex, entry.degree, entry.coefficient
                )?;
            }
            Ok(())
        }
        CommandSummary::Clean(report) => {
            writeln!(writer, "source: {}", report.source)?;
            writeln!(
                writer,
                "wrote {} interactions to {}",
                report.interactions,
                report.output.display()
            )?;
            writeln!(
                writer,
                "dropped: {} self-loops, {} duplicates",
                report.self_loops_dropped, report.duplicates_dropped
            )
        }
        CommandSummary::Generate(report) => match &report.output {
            Some(path) => {
                writeln!(writer, "model: {}", report.model)?;
                writeln!(writer, "seed: {}", report.seed)?;
                writeln!(writer, "vertices: {}", report.vertices)?;
                writeln!(
                    writer,
                    "wrote {} interactions to {}",
                    report.interactions,
                    path.display()
                )
            }
            None => {
                writeln!(writer, "{}", report.edges.len())?;
                for (source, target) in &report.edges {
                    writeln!(writer, "{source} {target}")?;
                }
                Ok(())
            }
        },
    }
}

fn optional<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |value| value.to_string())
}

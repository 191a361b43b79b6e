//! Command implementations and argument parsing for the `interactome` CLI.

use std::{
    io,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use interactome_core::{Interactome, InteractomeError, seeded_rng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::render::{
    CleanReport, CommandSummary, ComponentReport, GenerationReport, GraphStats, HistogramBin,
    VertexCoefficient,
};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "interactome",
    about = "Measure and generate protein-protein interaction networks."
)]
pub struct Cli {
    /// Rendering of the command summary on stdout.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Summary rendering formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one fact per line.
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print vertex and interaction counts, density, and degree statistics.
    Stats(SourceArgs),
    /// Print the degree distribution over a range of degrees.
    Histogram(HistogramCommand),
    /// Label every vertex with its connected component.
    Components(SourceArgs),
    /// Print the local clustering coefficient of the given vertices.
    Clustering(ClusteringCommand),
    /// Rewrite a network without duplicate interactions or self-loops.
    Clean(CleanCommand),
    /// Generate a random network.
    Generate(GenerateCommand),
}

/// An interaction file to load.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Path to the interaction file.
    pub path: PathBuf,
}

/// Options accepted by the `histogram` command.
#[derive(Debug, Args, Clone)]
pub struct HistogramCommand {
    /// Interaction file to load.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Smallest degree reported.
    #[arg(long, default_value_t = 0)]
    pub min: usize,

    /// Largest degree reported (defaults to the maximum degree).
    #[arg(long)]
    pub max: Option<usize>,
}

/// Options accepted by the `clustering` command.
#[derive(Debug, Args, Clone)]
pub struct ClusteringCommand {
    /// Interaction file to load.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Vertices to report on.
    #[arg(required = true)]
    pub vertices: Vec<String>,
}

/// Options accepted by the `clean` command.
#[derive(Debug, Args, Clone)]
pub struct CleanCommand {
    /// Interaction file to load.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Destination for the de-duplicated file.
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Random model to sample from.
    #[command(subcommand)]
    pub model: GenerateModel,
}

/// Supported random models.
#[derive(Debug, Subcommand, Clone)]
pub enum GenerateModel {
    /// Keep every vertex pair independently with a fixed probability.
    ErdosRenyi(ErdosRenyiArgs),
    /// Grow the network by preferential attachment.
    BarabasiAlbert(BarabasiAlbertArgs),
}

/// Erdos-Renyi parameters.
#[derive(Debug, Args, Clone)]
pub struct ErdosRenyiArgs {
    /// Number of candidate vertices.
    #[arg(long)]
    pub nodes: usize,

    /// Probability of keeping each vertex pair.
    #[arg(long)]
    pub probability: f64,

    /// Seed and destination.
    #[command(flatten)]
    pub output: GenerationOutput,
}

/// Barabasi-Albert parameters.
#[derive(Debug, Args, Clone)]
pub struct BarabasiAlbertArgs {
    /// Number of vertices, at least two.
    #[arg(long)]
    pub nodes: usize,

    /// Seed and destination.
    #[command(flatten)]
    pub output: GenerationOutput,
}

/// Options shared by every generator.
#[derive(Debug, Args, Clone, Default)]
pub struct GenerationOutput {
    /// Seed for reproducible output (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the generated network here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing an interaction file failed.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// Destination that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Loading, querying, or generating a network failed.
    #[error(transparent)]
    Core(#[from] InteractomeError),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, querying, generating, or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use interactome_cli::cli::{Cli, Command, CommandSummary, OutputFormat, SourceArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "2\nA B\nB C\n")?;
/// let cli = Cli {
///     format: OutputFormat::Human,
///     command: Command::Stats(SourceArgs {
///         path: file.path().to_path_buf(),
///     }),
/// };
/// let CommandSummary::Stats(stats) = run_cli(cli)? else {
///     panic!("stats command yields stats");
/// };
/// assert_eq!(stats.vertices, 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    let summary = match cli.command {
        Command::Stats(args) => {
            span.record("command", "stats");
            run_stats(&args.path)?
        }
        Command::Histogram(args) => {
            span.record("command", "histogram");
            run_histogram(args)?
        }
        Command::Components(args) => {
            span.record("command", "components");
            run_components(&args.path)?
        }
        Command::Clustering(args) => {
            span.record("command", "clustering");
            run_clustering(args)?
        }
        Command::Clean(args) => {
            span.record("command", "clean");
            run_clean(args)?
        }
        Command::Generate(args) => {
            span.record("command", "generate");
            run_generate(args.model)?
        }
    };
    info!("command completed");
    Ok(summary)
}

#[instrument(name = "cli.load", err, fields(path = %path.display()))]
pub(super) fn load(path: &Path) -> Result<Interactome, CliError> {
    let graph = Interactome::from_path(path)?;
    info!(
        source = graph.name(),
        vertices = graph.vertex_count(),
        interactions = graph.edge_count(),
        "network loaded"
    );
    Ok(graph)
}

pub(super) fn run_stats(path: &Path) -> Result<CommandSummary, CliError> {
    let graph = load(path)?;
    let max = graph.max_degree().ok();
    let report = graph.load_report();
    Ok(CommandSummary::Stats(GraphStats {
        source: graph.name().to_owned(),
        vertices: graph.vertex_count(),
        interactions: graph.edge_count(),
        density: graph.density().ok(),
        average_degree: graph.average_degree().ok(),
        max_degree: max.as_ref().map(|max| max.degree()),
        max_degree_vertices: max.map(|max| max.vertices().to_vec()).unwrap_or_default(),
        self_loops_dropped: report.self_loops(),
        duplicates_dropped: report.duplicates(),
    }))
}

pub(super) fn run_histogram(command: HistogramCommand) -> Result<CommandSummary, CliError> {
    let graph = load(&command.source.path)?;
    let max = match command.max {
        Some(max) => max,
        None => graph.max_degree().map_or(0, |max| max.degree()),
    };
    let bins = graph
        .degree_histogram(command.min, max)?
        .into_iter()
        .map(|(degree, count)| HistogramBin { degree, count })
        .collect();
    Ok(CommandSummary::Histogram {
        source: graph.name().to_owned(),
        bins,
    })
}

pub(super) fn run_components(path: &Path) -> Result<CommandSummary, CliError> {
    let graph = load(path)?;
    let components = graph.extract_all_components();
    Ok(CommandSummary::Components(ComponentReport {
        source: graph.name().to_owned(),
        sizes: components.sizes().into_iter().map(|(_, size)| size).collect(),
        labels: components
            .labels()
            .map(|(vertex, id)| (vertex.to_owned(), id.get()))
            .collect(),
    }))
}

pub(super) fn run_clustering(command: ClusteringCommand) -> Result<CommandSummary, CliError> {
    let graph = load(&command.source.path)?;
    let coefficients = command
        .vertices
        .into_iter()
        .map(|vertex| -> Result<VertexCoefficient, InteractomeError> {
            let degree = graph.degree(&vertex)?;
            let coefficient = graph.local_clustering(&vertex)?;
            Ok(VertexCoefficient {
                vertex,
                degree,
                coefficient,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CommandSummary::Clustering {
        source: graph.name().to_owned(),
        coefficients,
    })
}

#[instrument(
    name = "cli.clean",
    err,
    skip(command),
    fields(output = %command.output.display()),
)]
pub(super) fn run_clean(command: CleanCommand) -> Result<CommandSummary, CliError> {
    let graph = load(&command.source.path)?;
    write_file(&graph, &command.output)?;
    let report = graph.load_report();
    Ok(CommandSummary::Clean(CleanReport {
        source: graph.name().to_owned(),
        interactions: graph.edge_count(),
        self_loops_dropped: report.self_loops(),
        duplicates_dropped: report.duplicates(),
        output: command.output,
    }))
}

#[instrument(
    name = "cli.generate",
    err,
    skip(model),
    fields(model = field::Empty, seed = field::Empty),
)]
pub(super) fn run_generate(model: GenerateModel) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    let (graph, output, seed) = match model {
        GenerateModel::ErdosRenyi(args) => {
            let seed = resolve_seed(args.output.seed);
            span.record("model", "erdos-renyi");
            span.record("seed", seed);
            let graph = Interactome::erdos_renyi(args.nodes, args.probability, &mut seeded_rng(seed))?;
            (graph, args.output.output, seed)
        }
        GenerateModel::BarabasiAlbert(args) => {
            let seed = resolve_seed(args.output.seed);
            span.record("model", "barabasi-albert");
            span.record("seed", seed);
            let graph = Interactome::barabasi_albert(args.nodes, &mut seeded_rng(seed))?;
            (graph, args.output.output, seed)
        }
    };

    let edges = match &output {
        Some(path) => {
            write_file(&graph, path)?;
            Vec::new()
        }
        None => graph
            .interactions()
            .iter()
            .map(|edge| (edge.source().to_owned(), edge.target().to_owned()))
            .collect(),
    };
    Ok(CommandSummary::Generate(GenerationReport {
        model: graph.name().to_owned(),
        seed,
        vertices: graph.vertex_count(),
        interactions: graph.edge_count(),
        output,
        edges,
    }))
}

pub(super) fn resolve_seed(requested: Option<u64>) -> u64 {
    requested.unwrap_or_else(rand::random)
}

fn write_file(graph: &Interactome, path: &Path) -> Result<(), CliError> {
    graph
        .write_interactions_file(path)
        .map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })
}

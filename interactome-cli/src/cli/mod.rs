//! Command-line interface for loading, measuring, and generating
//! interaction networks.

mod commands;
mod render;

pub use commands::{
    BarabasiAlbertArgs, CleanCommand, Cli, CliError, ClusteringCommand, Command, ErdosRenyiArgs,
    GenerateCommand, GenerateModel, GenerationOutput, HistogramCommand, OutputFormat, SourceArgs,
    run_cli,
};
pub use render::{
    CleanReport, CommandSummary, ComponentReport, GenerationReport, GraphStats, HistogramBin,
    VertexCoefficient, render_summary,
};

#[cfg(test)]
mod test_helpers;

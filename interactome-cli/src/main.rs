//! Entry point for the `interactome` binary.
//!
//! Installs logging, parses arguments, runs the command, and renders its
//! summary to stdout. Failures are logged with their stable error codes and
//! mapped to a non-zero exit status.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use interactome_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;
    let summary = run_cli(cli).context("command failed")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, format, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let Err(err) = try_main() else {
        return ExitCode::SUCCESS;
    };

    let (code, format_code) = match err.downcast_ref::<CliError>() {
        Some(CliError::Core(core)) => (Some(core.code()), core.format_code()),
        _ => (None, None),
    };
    error!(
        error = format!("{err:#}"),
        code = code.map(|code| field::display(code.as_str())),
        format_code = format_code.map(|code| field::display(code.as_str())),
        "interactome failed"
    );
    ExitCode::FAILURE
}

#[expect(
    clippy::print_stderr,
    reason = "Logging is unavailable until the subscriber is installed"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}

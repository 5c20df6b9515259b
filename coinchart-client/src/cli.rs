use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use coinchart_model::data::loader::load_observations;
use coinchart_model::metrics::deriver::MetricsDeriver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::layout::ChartLayout;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Render a market history CSV (snapped_at, price, total_volume, market_cap)
/// into a PNG chart written next to the input file.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the CSV export.
    #[arg(value_name = "input_csv_file")]
    pub input: PathBuf,
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads `input`, derives the metrics needed by `layout` and writes the chart.
///
/// Returns the path of the written image.
pub fn plot(layout: ChartLayout, input: &Path) -> Result<PathBuf> {
    let observations = load_observations(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let frame = MetricsDeriver::new(layout.metrics_params())
        .derive(&observations)
        .context("failed to derive metrics")?;

    let output = layout.output_path(input);
    layout
        .render(&frame, &output, &layout.options())
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(output = %output.display(), rows = frame.len(), "chart written");
    Ok(output)
}

/// Entry point shared by the binaries.
///
/// Argument errors exit with status 1 before anything touches the filesystem.
pub fn run(layout: ChartLayout) -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing();

    if !cli.input.exists() {
        eprintln!("Error: File '{}' not found.", cli.input.display());
        return ExitCode::FAILURE;
    }

    match plot(layout, &cli.input) {
        Ok(output) => {
            println!("{} saved as {}", layout.name(), output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

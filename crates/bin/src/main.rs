//! Seasonality CLI binary.
//!
//! Loads the energy-sector series, writes the exploratory figures and prints
//! the Ljung-Box results.

use clap::Parser;
use seasonality::output::{FigureSink, SvgDirectorySink};
use seasonality::{AnalysisConfig, Pipeline};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "seasonality")]
#[command(about = "Exploratory time-series analysis of energy-sector data", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the source CSV files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory figures are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Do not render figures
    #[arg(long)]
    skip_plots: bool,

    /// Do not run the Ljung-Box tests
    #[arg(long)]
    skip_tests: bool,
}

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    info!(
        data_dir = %config.data_dir.display(),
        output_dir = %config.output_dir.display(),
        "Starting analysis"
    );
    let pipeline = Pipeline::new(config)?;

    let mut sink = if cli.skip_plots {
        None
    } else {
        Some(SvgDirectorySink::new(&pipeline.config().output_dir)?)
    };
    let mut stdout = std::io::stdout().lock();

    let analysis = pipeline.run(
        sink.as_mut().map(|s| s as &mut dyn FigureSink),
        if cli.skip_tests {
            None
        } else {
            Some(&mut stdout as &mut dyn Write)
        },
    )?;
    stdout.flush()?;

    if let Some(sink) = &sink {
        info!(
            figures = sink.written().len(),
            dir = %sink.dir().display(),
            "Figures written"
        );
    }
    info!(
        rows = analysis.table.height(),
        rejected = analysis.reports.iter().filter(|r| r.rejects_null()).count(),
        "Analysis complete"
    );

    Ok(())
}

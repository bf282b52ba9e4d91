use clap::Parser;
use loan_allocator::application::allocate;
use loan_allocator::application::report::Report;
use loan_allocator::interfaces::csv::{DataPaths, OutputPaths, load_dataset, write_report};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding facilities.csv, covenants.csv and loans.csv
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Facilities CSV file, overriding the one in the input directory
    #[arg(long)]
    facilities: Option<PathBuf>,

    /// Covenants CSV file, overriding the one in the input directory
    #[arg(long)]
    covenants: Option<PathBuf>,

    /// Loans CSV file, overriding the one in the input directory
    #[arg(long)]
    loans: Option<PathBuf>,

    /// Directory receiving yields.csv and assignments.csv
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Print a JSON summary of the run to stdout
    #[arg(long)]
    summary: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn data_paths(&self) -> DataPaths {
        let defaults = DataPaths::in_dir(&self.input_dir);
        DataPaths {
            facilities: self.facilities.clone().unwrap_or(defaults.facilities),
            covenants: self.covenants.clone().unwrap_or(defaults.covenants),
            loans: self.loans.clone().unwrap_or(defaults.loans),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dataset = load_dataset(&cli.data_paths()).await.into_diagnostic()?;
    let outcome = allocate(dataset.facilities, &dataset.covenants, &dataset.loans);
    let summary = outcome.summary();
    info!(
        assigned = summary.loans_assigned,
        dropped = summary.loans_dropped,
        facilities_funded = summary.facilities_funded,
        "allocation complete"
    );

    let report = Report::assemble(&outcome);
    write_report(&report, &OutputPaths::in_dir(&cli.output_dir)).into_diagnostic()?;

    if cli.summary {
        println!("{}", summary.to_json().into_diagnostic()?);
    }

    Ok(())
}

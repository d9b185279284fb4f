use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tg2m::{Dataset, Result, RowOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Standardize the SMILES in a CSV file and convert them to molecular graphs
#[derive(Parser)]
#[command(name = "tg2m", version)]
struct Cli {
    /// CSV file with a header row
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Column holding the SMILES strings
    #[arg(short, long, default_value = tg2m::DEFAULT_COLUMN)]
    column: String,

    /// Print each graph as a node-link JSON document, one per line
    #[arg(long, conflicts_with = "report")]
    json: bool,

    /// Print every row, including the reason dropped rows were skipped
    #[arg(long)]
    report: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let dataset = Dataset::load_column(&cli.input, &cli.column)?;
    info!(rows = dataset.len(), path = %cli.input.display(), "loaded");
    let outcomes = dataset.process()?;
    let mut kept = 0;
    for outcome in &outcomes {
        match outcome {
            RowOutcome::Graph {
                row,
                canonical,
                graph,
                ..
            } => {
                if cli.json {
                    let doc = serde_json::to_string(&graph.to_node_link())
                        .map_err(std::io::Error::from)?;
                    println!("{doc}");
                } else if cli.report {
                    println!("{row}\tok\t{canonical}");
                } else {
                    println!(
                        "{kept}\t{} atoms\t{} bonds\t{canonical}",
                        graph.node_count(),
                        graph.edge_count()
                    );
                }
                kept += 1;
            }
            RowOutcome::Dropped {
                row,
                smiles,
                reason,
            } => {
                if cli.report {
                    println!("{row}\tdropped\t{smiles}\t{reason}");
                }
            }
        }
    }
    info!(kept, dropped = outcomes.len() - kept, "done");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if !tg2m::rdkit::available() {
        eprintln!(
            "error: rdkit.Chem cannot be imported by the embedded interpreter"
        );
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

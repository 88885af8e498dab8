//! Curio sync CLI
//!
//! Reconciles the authoritative JSON catalog with an incoming copy of it:
//! preview the differences, overwrite wholesale, or merge with conflict
//! archiving. Reports go to standard output, diagnostics to standard error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod config;
mod error;
mod merge_log;
mod snapshot;
mod store;
mod sync;

use config::Config;
use error::Result;

#[derive(Debug, Parser)]
#[command(name = "curio")]
#[command(about = "Curio - local catalog reconciliation", long_about = None)]
struct Cli {
    /// Directory holding the authoritative catalog files
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show what the incoming state would change, without writing anything
    Preview {
        /// Directory holding the incoming state (defaults to the data directory)
        incoming_dir: Option<PathBuf>,
    },
    /// Replace the authoritative state with the incoming one
    Overwrite {
        /// Directory holding the incoming state (defaults to the data directory)
        incoming_dir: Option<PathBuf>,
    },
    /// Merge the incoming state in, archiving the records it supersedes
    Merge {
        /// Directory holding the incoming state (defaults to the data directory)
        incoming_dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.data_dir);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Preview { incoming_dir } => {
            let incoming = incoming_dir.unwrap_or_else(|| config.data_dir.clone());
            let diff = sync::preview(config, &incoming)?;
            println!("{}", serde_json::to_string_pretty(&diff)?);
        }
        Commands::Overwrite { incoming_dir } => {
            let incoming = incoming_dir.unwrap_or_else(|| config.data_dir.clone());
            let report = sync::overwrite(config, &incoming)?;
            tracing::info!(
                snapshot = %report.snapshot_dir.display(),
                "overwrite complete"
            );
        }
        Commands::Merge { incoming_dir } => {
            let incoming = incoming_dir.unwrap_or_else(|| config.data_dir.clone());
            let report = sync::merge(config, &incoming)?;
            tracing::info!(
                snapshot = %report.snapshot_dir.display(),
                conflicts = report.conflicts.len(),
                "merge complete"
            );
        }
    }

    Ok(())
}

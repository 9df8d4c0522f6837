//! Recon CLI - ledger vs bank statement reconciliation in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{reconcile, stream};

/// Recon - reconcile an internal ledger against bank statements
#[derive(Parser)]
#[command(name = "recon", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a ledger file against one or more bank statement files
    Reconcile {
        /// Path to the internal ledger CSV
        #[arg(long)]
        ledger: PathBuf,
        /// Path to a bank statement CSV (repeat for multiple banks)
        #[arg(long = "statement", required = true)]
        statements: Vec<PathBuf>,
        /// Start of the reconciliation window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        start: NaiveDate,
        /// End of the reconciliation window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: NaiveDate,
        /// Worker threads for multi-file ingestion
        #[arg(long)]
        pool_size: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stream one large bank statement file against the ledger,
    /// writing results incrementally to CSV files
    Stream {
        /// Path to the internal ledger CSV
        #[arg(long)]
        ledger: PathBuf,
        /// Path to the bank statement CSV
        #[arg(long)]
        statement: PathBuf,
        /// Start of the reconciliation window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        start: NaiveDate,
        /// End of the reconciliation window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: NaiveDate,
        /// Directory for the result CSV files
        #[arg(long, default_value = "recon-out")]
        out: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("recon_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Reconcile {
            ledger,
            statements,
            start,
            end,
            pool_size,
            json,
        } => reconcile::run(ledger, statements, start, end, pool_size, json),
        Commands::Stream {
            ledger,
            statement,
            start,
            end,
            out,
            json,
        } => stream::run(ledger, statement, start, end, out, json),
    }
}

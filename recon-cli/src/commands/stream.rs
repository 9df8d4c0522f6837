//! Stream command - memory-bounded reconciliation with CSV output

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use recon_core::adapters::CsvSink;
use recon_core::{DateRange, ReconcileConfig, ReconcileContext};

use crate::output;

pub fn run(
    ledger: PathBuf,
    statement: PathBuf,
    start: NaiveDate,
    end: NaiveDate,
    out: PathBuf,
    json: bool,
) -> Result<()> {
    if start > end {
        anyhow::bail!("start date {start} is after end date {end}");
    }

    let ctx = ReconcileContext::new(ReconcileConfig::from_env());
    let sink = CsvSink::create(&out)?;

    let stats = ctx.streaming_matcher.reconcile_streaming(
        &ledger,
        &statement,
        DateRange::new(start, end),
        &sink,
    )?;
    sink.flush()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Streaming Reconciliation".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Matched", &stats.matched.to_string()]);
    table.add_row(vec!["Unmatched ledger", &stats.unmatched_ledger.to_string()]);
    table.add_row(vec![
        "Unmatched statements",
        &stats.unmatched_statements.to_string(),
    ]);
    table.add_row(vec!["Skipped rows", &stats.skipped_rows.to_string()]);
    table.add_row(vec!["Outside date range", &stats.filtered_out.to_string()]);
    println!("{table}");
    println!();

    output::success(&format!(
        "Results written to {} (run {})",
        out.display(),
        sink.run_id()
    ));
    Ok(())
}

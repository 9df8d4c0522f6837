//! Reconcile command - batch reconciliation over CSV files

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use recon_core::{DateRange, ReconcileConfig, ReconcileContext};

use crate::output;

pub fn run(
    ledger: PathBuf,
    statements: Vec<PathBuf>,
    start: NaiveDate,
    end: NaiveDate,
    pool_size: Option<usize>,
    json: bool,
) -> Result<()> {
    if start > end {
        anyhow::bail!("start date {start} is after end date {end}");
    }

    let mut config = ReconcileConfig::from_env();
    if let Some(pool_size) = pool_size {
        config = config.with_pool_size(pool_size);
    }

    let ctx = ReconcileContext::new(config);
    let summary = ctx
        .reconcile_service
        .reconcile(&ledger, &statements, DateRange::new(start, end))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Reconciliation Summary".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Ledger transactions", &summary.total_ledger.to_string()]);
    table.add_row(vec!["Statement records", &summary.total_statements.to_string()]);
    table.add_row(vec!["Matched", &summary.matched_count.to_string()]);
    table.add_row(vec!["Unmatched", &summary.unmatched_count.to_string()]);
    table.add_row(vec![
        "Reconciliation rate",
        &format!("{:.1}%", summary.reconciliation_rate),
    ]);
    table.add_row(vec![
        "Total discrepancy",
        &summary.total_discrepancy.to_string(),
    ]);
    println!("{table}");
    println!();

    println!(
        "Date range: {} to {}",
        summary.date_range.start, summary.date_range.end
    );

    if !summary.unmatched_by_bank.is_empty() {
        println!();
        println!("{}", "Unmatched statement records by bank".bold());

        let mut table = output::create_table();
        table.set_header(vec!["Bank", "Records"]);

        let mut banks: Vec<_> = summary.unmatched_by_bank.iter().collect();
        banks.sort_by(|a, b| a.0.cmp(b.0));
        for (bank, records) in banks {
            table.add_row(vec![bank, &records.len().to_string()]);
        }
        println!("{table}");
    }

    Ok(())
}

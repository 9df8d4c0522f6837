//! Summary aggregation

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{
    DateRange, LedgerTransaction, MatchOutcome, StatementRecord, Summary, UNKNOWN_BANK,
};

/// Build the aggregate summary for a completed match outcome.
///
/// `ledger` and `statements` are the full date-filtered inputs that went
/// into matching; the outcome must be a partition of exactly those records.
pub fn summarize(
    ledger: &[LedgerTransaction],
    statements: &[StatementRecord],
    outcome: &MatchOutcome,
    range: DateRange,
) -> Summary {
    let matched_count = outcome.matched_count();

    let reconciliation_rate = if ledger.is_empty() {
        0.0
    } else {
        matched_count as f64 / ledger.len() as f64 * 100.0
    };

    Summary {
        total_ledger: ledger.len(),
        total_statements: statements.len(),
        matched_count,
        unmatched_count: outcome.unmatched_count(),
        unmatched_by_bank: group_by_bank(&outcome.unmatched_statements),
        total_discrepancy: total_discrepancy(outcome),
        reconciliation_rate,
        date_range: range,
    }
}

/// Group unmatched statement records by issuing bank, preserving input
/// order within each group. Records without a bank name land under the
/// "Unknown" label.
fn group_by_bank(unmatched: &[StatementRecord]) -> HashMap<String, Vec<StatementRecord>> {
    let mut groups: HashMap<String, Vec<StatementRecord>> = HashMap::new();
    for record in unmatched {
        let bank = record
            .bank
            .clone()
            .unwrap_or_else(|| UNKNOWN_BANK.to_string());
        groups.entry(bank).or_default().push(record.clone());
    }
    groups
}

/// Sum of per-pair discrepancies. All zero under exact matching; the sum is
/// still computed record-by-record so a tolerance-matching mode reports
/// real totals without changes here.
fn total_discrepancy(outcome: &MatchOutcome) -> Decimal {
    outcome.matches.iter().map(|pair| pair.discrepancy).sum()
}

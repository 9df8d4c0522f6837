//! Reconciliation summary

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, StatementRecord};

/// Group label for unmatched statement records whose issuing bank is not
/// known.
pub const UNKNOWN_BANK: &str = "Unknown";

/// Aggregate result of a reconciliation run.
///
/// Built by [`services::summarize`] from a match outcome; all counts refer
/// to the date-filtered inputs that actually entered matching.
///
/// [`services::summarize`]: crate::services::summarize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Ledger transactions processed
    pub total_ledger: usize,
    /// Statement records processed, across all source files
    pub total_statements: usize,
    pub matched_count: usize,
    /// Unmatched ledger transactions plus unmatched statement records
    pub unmatched_count: usize,
    /// Unmatched statement records grouped by issuing bank, input order
    /// preserved within each group
    pub unmatched_by_bank: HashMap<String, Vec<StatementRecord>>,
    /// Sum of per-pair discrepancies; always zero under exact matching
    pub total_discrepancy: Decimal,
    /// Percentage of ledger transactions that found a statement match,
    /// 0 when the ledger side is empty
    pub reconciliation_rate: f64,
    pub date_range: DateRange,
}

impl Summary {
    /// Ledger plus statement records processed.
    pub fn total_processed(&self) -> usize {
        self.total_ledger + self.total_statements
    }

    /// Unmatched statement records across all banks.
    pub fn unmatched_statement_count(&self) -> usize {
        self.unmatched_by_bank.values().map(Vec::len).sum()
    }
}

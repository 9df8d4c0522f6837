//! CSV match sink
//!
//! Writes reconciliation results to three CSV files under an output
//! directory, one row per sink call:
//!
//! - `matched.csv`
//! - `unmatched_ledger.csv`
//! - `unmatched_statements.csv`
//!
//! Every row is tagged with the run id so output from repeated runs into
//! the same directory stays attributable.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{LedgerTransaction, MatchedPair, StatementRecord};
use crate::ports::MatchSink;

/// CSV-file-backed match sink
pub struct CsvSink {
    run_id: Uuid,
    matched: Mutex<csv::Writer<File>>,
    unmatched_ledger: Mutex<csv::Writer<File>>,
    unmatched_statements: Mutex<csv::Writer<File>>,
}

impl CsvSink {
    /// Create the output directory (if needed) and the three result files,
    /// writing headers immediately.
    pub fn create(out_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(out_dir)?;

        let mut matched = csv::Writer::from_path(out_dir.join("matched.csv"))
            .map_err(|e| Error::sink(e.to_string()))?;
        matched
            .write_record([
                "run_id",
                "ledger_id",
                "ledger_amount",
                "direction",
                "timestamp",
                "statement_id",
                "statement_amount",
                "date",
                "bank",
                "discrepancy",
                "confidence",
            ])
            .map_err(|e| Error::sink(e.to_string()))?;

        let mut unmatched_ledger = csv::Writer::from_path(out_dir.join("unmatched_ledger.csv"))
            .map_err(|e| Error::sink(e.to_string()))?;
        unmatched_ledger
            .write_record(["run_id", "id", "amount", "direction", "timestamp"])
            .map_err(|e| Error::sink(e.to_string()))?;

        let mut unmatched_statements =
            csv::Writer::from_path(out_dir.join("unmatched_statements.csv"))
                .map_err(|e| Error::sink(e.to_string()))?;
        unmatched_statements
            .write_record(["run_id", "id", "amount", "date", "bank"])
            .map_err(|e| Error::sink(e.to_string()))?;

        Ok(Self {
            run_id: Uuid::new_v4(),
            matched: Mutex::new(matched),
            unmatched_ledger: Mutex::new(unmatched_ledger),
            unmatched_statements: Mutex::new(unmatched_statements),
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Flush all three writers. Also happens on drop, but callers that want
    /// to read the files back within the same process should flush
    /// explicitly.
    pub fn flush(&self) -> Result<()> {
        for writer in [
            &self.matched,
            &self.unmatched_ledger,
            &self.unmatched_statements,
        ] {
            writer
                .lock()
                .expect("sink poisoned")
                .flush()
                .map_err(|e| Error::sink(e.to_string()))?;
        }
        Ok(())
    }
}

impl MatchSink for CsvSink {
    fn record_match(&self, pair: &MatchedPair) -> Result<()> {
        self.matched
            .lock()
            .expect("sink poisoned")
            .write_record([
                self.run_id.to_string(),
                pair.ledger.id.clone(),
                pair.ledger.amount.to_string(),
                pair.ledger.direction.as_str().to_string(),
                pair.ledger.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                pair.statement.id.clone(),
                pair.statement.amount.to_string(),
                pair.statement.date.to_string(),
                pair.statement.bank.clone().unwrap_or_default(),
                pair.discrepancy.to_string(),
                format!("{:.1}", pair.confidence),
            ])
            .map_err(|e| Error::sink(e.to_string()))
    }

    fn record_unmatched_statement(&self, record: &StatementRecord) -> Result<()> {
        self.unmatched_statements
            .lock()
            .expect("sink poisoned")
            .write_record([
                self.run_id.to_string(),
                record.id.clone(),
                record.amount.to_string(),
                record.date.to_string(),
                record.bank.clone().unwrap_or_default(),
            ])
            .map_err(|e| Error::sink(e.to_string()))
    }

    fn record_unmatched_ledger(&self, transaction: &LedgerTransaction) -> Result<()> {
        self.unmatched_ledger
            .lock()
            .expect("sink poisoned")
            .write_record([
                self.run_id.to_string(),
                transaction.id.clone(),
                transaction.amount.to_string(),
                transaction.direction.as_str().to_string(),
                transaction.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ])
            .map_err(|e| Error::sink(e.to_string()))
    }
}

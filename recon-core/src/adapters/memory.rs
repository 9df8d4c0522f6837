//! In-memory match sink
//!
//! Collects reconciliation results in process memory. Used by tests and by
//! programmatic callers that want a [`MatchOutcome`]-shaped view of a
//! streaming run without any I/O.

use std::sync::Mutex;

use crate::domain::result::Result;
use crate::domain::{LedgerTransaction, MatchOutcome, MatchedPair, StatementRecord};
use crate::ports::MatchSink;

/// Mutex-guarded in-memory sink
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<MatchOutcome>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn outcome(&self) -> MatchOutcome {
        self.inner.lock().expect("sink poisoned").clone()
    }

    pub fn matched_count(&self) -> usize {
        self.inner.lock().expect("sink poisoned").matches.len()
    }

    pub fn unmatched_ledger_count(&self) -> usize {
        self.inner.lock().expect("sink poisoned").unmatched_ledger.len()
    }

    pub fn unmatched_statement_count(&self) -> usize {
        self.inner
            .lock()
            .expect("sink poisoned")
            .unmatched_statements
            .len()
    }
}

impl MatchSink for MemorySink {
    fn record_match(&self, pair: &MatchedPair) -> Result<()> {
        self.inner
            .lock()
            .expect("sink poisoned")
            .matches
            .push(pair.clone());
        Ok(())
    }

    fn record_unmatched_statement(&self, record: &StatementRecord) -> Result<()> {
        self.inner
            .lock()
            .expect("sink poisoned")
            .unmatched_statements
            .push(record.clone());
        Ok(())
    }

    fn record_unmatched_ledger(&self, transaction: &LedgerTransaction) -> Result<()> {
        self.inner
            .lock()
            .expect("sink poisoned")
            .unmatched_ledger
            .push(transaction.clone());
        Ok(())
    }
}

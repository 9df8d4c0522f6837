//! Match sink port - incremental result persistence abstraction

use crate::domain::result::Result;
use crate::domain::{LedgerTransaction, MatchOutcome, MatchedPair, StatementRecord};

/// Destination for reconciliation results.
///
/// The streaming matcher calls the three record methods incrementally, at
/// most once per record, as results are produced; the batch path hands a
/// complete outcome to [`save_all`]. Implementations must tolerate being
/// called from a long-running loop (no buffering requirements are imposed
/// on them).
///
/// [`save_all`]: MatchSink::save_all
pub trait MatchSink: Send + Sync {
    fn record_match(&self, pair: &MatchedPair) -> Result<()>;

    fn record_unmatched_statement(&self, record: &StatementRecord) -> Result<()>;

    fn record_unmatched_ledger(&self, transaction: &LedgerTransaction) -> Result<()>;

    /// Persist a complete match outcome. The default implementation replays
    /// the outcome through the three record methods in partition order.
    fn save_all(&self, outcome: &MatchOutcome) -> Result<()> {
        for pair in &outcome.matches {
            self.record_match(pair)?;
        }
        for transaction in &outcome.unmatched_ledger {
            self.record_unmatched_ledger(transaction)?;
        }
        for record in &outcome.unmatched_statements {
            self.record_unmatched_statement(record)?;
        }
        Ok(())
    }
}

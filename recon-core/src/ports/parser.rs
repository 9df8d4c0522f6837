//! Source parser port - per-file record parsing abstraction

use std::path::Path;

use crate::domain::result::Result;
use crate::domain::{DateRange, LedgerTransaction, StatementRecord};

/// Lazy statement-record sequence, one item per data row.
///
/// Row-level parse failures are yielded as `Err` items rather than raised,
/// so a consumer can log and continue; structural failures (missing file,
/// bad header) abort before a stream is returned at all.
pub type StatementStream = Box<dyn Iterator<Item = Result<StatementRecord>> + Send>;

/// Per-file record parser abstraction
///
/// Implementations own the file format (column layout, header contract)
/// and apply the date-range filter themselves for the batch methods,
/// returning only records within the inclusive range. Services perform
/// matching without knowing anything about the underlying format.
pub trait SourceParser: Send + Sync {
    /// Parse the internal ledger file, returning transactions within the
    /// date range in file order.
    fn parse_ledger(&self, path: &Path, range: DateRange) -> Result<Vec<LedgerTransaction>>;

    /// Parse a bank statement file, returning records within the date
    /// range in file order.
    fn parse_statements(&self, path: &Path, range: DateRange) -> Result<Vec<StatementRecord>>;

    /// Open a bank statement file as a lazy row sequence for memory-bounded
    /// matching. The stream is not date-filtered; callers apply their own
    /// range check per record. Restartable only by reopening.
    fn stream_statements(&self, path: &Path) -> Result<StatementStream>;
}

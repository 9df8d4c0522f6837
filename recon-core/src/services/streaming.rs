//! Streaming matcher - memory-bounded reconciliation
//!
//! Variant of the exact matcher for statement files too large to hold in
//! memory. The ledger side (assumed to fit comfortably) is indexed up
//! front; the statement side is consumed one record at a time and results
//! are pushed to a [`MatchSink`] as they are produced, so memory stays
//! O(ledger) no matter how long the statement stream runs.
//!
//! Malformed statement rows are skipped with a warning rather than
//! aborting: a single corrupt line in a huge stream should not kill the
//! whole job. This is deliberately the opposite of the parallel ingest
//! coordinator's fail-fast policy.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::result::Result;
use crate::domain::{DateRange, MatchedPair};
use crate::ports::{MatchSink, SourceParser};
use crate::services::matcher::build_ledger_index;

/// Counters reported by a streaming run
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamingStats {
    pub matched: usize,
    pub unmatched_ledger: usize,
    pub unmatched_statements: usize,
    /// Statement rows skipped as malformed
    pub skipped_rows: usize,
    /// Statement rows outside the date range
    pub filtered_out: usize,
}

/// Memory-bounded reconciliation service
pub struct StreamingMatcher {
    parser: Arc<dyn SourceParser>,
}

impl StreamingMatcher {
    pub fn new(parser: Arc<dyn SourceParser>) -> Self {
        Self { parser }
    }

    /// Reconcile one ledger file against one statement file of arbitrary
    /// size, emitting results incrementally through the sink.
    ///
    /// Each sink method is invoked at most once per record: matches and
    /// unmatched statement records while streaming, unmatched ledger
    /// transactions in one pass after the stream is exhausted.
    pub fn reconcile_streaming(
        &self,
        ledger_path: &Path,
        statement_path: &Path,
        range: DateRange,
        sink: &dyn MatchSink,
    ) -> Result<StreamingStats> {
        let ledger = self.parser.parse_ledger(ledger_path, range)?;
        let mut index = build_ledger_index(&ledger);
        info!(transactions = index.len(), "ledger indexed for streaming run");

        let mut stats = StreamingStats::default();

        for row in self.parser.stream_statements(statement_path)? {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "skipping invalid statement row");
                    stats.skipped_rows += 1;
                    continue;
                }
            };

            if !range.contains(record.date) {
                stats.filtered_out += 1;
                continue;
            }

            match index.remove(&record.matching_key()) {
                Some(transaction) => {
                    sink.record_match(&MatchedPair::exact(transaction, record))?;
                    stats.matched += 1;
                }
                None => {
                    sink.record_unmatched_statement(&record)?;
                    stats.unmatched_statements += 1;
                }
            }
        }

        // Everything still in the index never found a statement record.
        for transaction in index.into_values() {
            sink.record_unmatched_ledger(&transaction)?;
            stats.unmatched_ledger += 1;
        }

        info!(
            matched = stats.matched,
            unmatched_ledger = stats.unmatched_ledger,
            unmatched_statements = stats.unmatched_statements,
            skipped = stats.skipped_rows,
            "streaming reconciliation complete"
        );
        Ok(stats)
    }
}

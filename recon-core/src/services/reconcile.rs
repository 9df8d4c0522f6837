//! Reconcile service - batch entry points
//!
//! Orchestrates the complete batch flow: parse the ledger file, ingest the
//! statement files (in parallel when there is more than one), run the exact
//! matcher, and aggregate the summary. Either a complete [`Summary`] comes
//! back or a single typed error; there is no partial result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::ReconcileConfig;
use crate::domain::result::Result;
use crate::domain::{DateRange, LedgerTransaction, StatementRecord, Summary};
use crate::ports::{MatchSink, SourceParser};
use crate::services::{summarize, ExactMatcher, ParallelIngestor};

/// Batch reconciliation service
pub struct ReconcileService {
    parser: Arc<dyn SourceParser>,
    matcher: ExactMatcher,
    ingestor: ParallelIngestor,
}

impl ReconcileService {
    pub fn new(parser: Arc<dyn SourceParser>, config: &ReconcileConfig) -> Self {
        let ingestor = ParallelIngestor::new(Arc::clone(&parser), config);
        Self {
            parser,
            matcher: ExactMatcher::new(),
            ingestor,
        }
    }

    /// Reconcile the ledger file against one or more statement files.
    ///
    /// Statement files are parsed through the parallel coordinator when
    /// more than one is given; a single file is parsed inline since there
    /// is nothing to fan out.
    pub fn reconcile(
        &self,
        ledger_path: &Path,
        statement_paths: &[PathBuf],
        range: DateRange,
    ) -> Result<Summary> {
        let (ledger, statements) = self.load_inputs(ledger_path, statement_paths, range)?;
        let outcome = self.matcher.match_records(&ledger, &statements);
        let summary = summarize(&ledger, &statements, &outcome, range);

        info!(
            ledger = summary.total_ledger,
            statements = summary.total_statements,
            matched = summary.matched_count,
            unmatched = summary.unmatched_count,
            rate = summary.reconciliation_rate,
            "reconciliation complete"
        );
        Ok(summary)
    }

    /// Like [`reconcile`], additionally persisting the full match outcome
    /// through the sink's bulk contract.
    ///
    /// [`reconcile`]: ReconcileService::reconcile
    pub fn reconcile_to_sink(
        &self,
        ledger_path: &Path,
        statement_paths: &[PathBuf],
        range: DateRange,
        sink: &dyn MatchSink,
    ) -> Result<Summary> {
        let (ledger, statements) = self.load_inputs(ledger_path, statement_paths, range)?;
        let outcome = self.matcher.match_records(&ledger, &statements);
        sink.save_all(&outcome)?;

        Ok(summarize(&ledger, &statements, &outcome, range))
    }

    /// Parse both sides of a run, fanning statement parsing out when more
    /// than one file is given.
    fn load_inputs(
        &self,
        ledger_path: &Path,
        statement_paths: &[PathBuf],
        range: DateRange,
    ) -> Result<(Vec<LedgerTransaction>, Vec<StatementRecord>)> {
        let ledger = self.parser.parse_ledger(ledger_path, range)?;

        let statements = if statement_paths.len() > 1 {
            self.ingestor.parse_statement_files(statement_paths, range)?
        } else {
            match statement_paths.first() {
                Some(path) => self.parser.parse_statements(path, range)?,
                None => Vec::new(),
            }
        };

        Ok((ledger, statements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::adapters::{CsvSourceParser, MemorySink};

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn service() -> ReconcileService {
        ReconcileService::new(Arc::new(CsvSourceParser::new()), &ReconcileConfig::default())
    }

    fn range_2024_01() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn test_reconcile_single_statement_file() {
        let dir = TempDir::new().unwrap();
        let ledger = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\n\
             S1,5000000,OUT,2024-01-10T14:30:00\n\
             S2,123,IN,2024-01-11T10:00:00\n",
        );
        let bank = write_file(
            &dir,
            "bank.csv",
            "id,amount,date,bank\nB1,-5000000,2024-01-10,BCA\n",
        );

        let summary = service()
            .reconcile(&ledger, &[bank], range_2024_01())
            .unwrap();

        assert_eq!(summary.total_ledger, 2);
        assert_eq!(summary.total_statements, 1);
        assert_eq!(summary.matched_count, 1);
        assert_eq!(summary.unmatched_count, 1);
        assert_eq!(summary.reconciliation_rate, 50.0);
    }

    #[test]
    fn test_reconcile_no_statement_files() {
        let dir = TempDir::new().unwrap();
        let ledger = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\nS1,100,OUT,2024-01-10T14:30:00\n",
        );

        let summary = service().reconcile(&ledger, &[], range_2024_01()).unwrap();

        assert_eq!(summary.total_statements, 0);
        assert_eq!(summary.matched_count, 0);
        assert_eq!(summary.unmatched_count, 1);
        assert_eq!(summary.reconciliation_rate, 0.0);
    }

    #[test]
    fn test_reconcile_to_sink_saves_outcome() {
        let dir = TempDir::new().unwrap();
        let ledger = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\n\
             S1,100,OUT,2024-01-10T14:30:00\n\
             S2,999,IN,2024-01-11T10:00:00\n",
        );
        let bank = write_file(
            &dir,
            "bank.csv",
            "id,amount,date,bank\nB1,-100,2024-01-10,BCA\nB2,77,2024-01-12,BNI\n",
        );

        let sink = MemorySink::new();
        let summary = service()
            .reconcile_to_sink(&ledger, &[bank], range_2024_01(), &sink)
            .unwrap();

        assert_eq!(summary.matched_count, 1);
        assert_eq!(sink.matched_count(), 1);
        assert_eq!(sink.unmatched_ledger_count(), 1);
        assert_eq!(sink.unmatched_statement_count(), 1);
    }
}

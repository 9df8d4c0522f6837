//! Parallel ingestion coordinator
//!
//! Fans statement-file parsing out across a bounded pool of OS threads and
//! fans results back in. Pure orchestration: all parsing is delegated to
//! the [`SourceParser`] port, one task per file.
//!
//! The aggregated output is the concatenation of per-file results in input
//! path order, never completion order, so scheduling can never change what
//! callers observe. If any task fails the whole ingest fails with a single
//! error naming the file; sibling results are discarded and in-flight tasks
//! are left to finish on their own.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, info};

use crate::config::ReconcileConfig;
use crate::domain::result::{Error, Result};
use crate::domain::{DateRange, StatementRecord};
use crate::ports::SourceParser;

/// Coordinator for multi-file statement ingestion
pub struct ParallelIngestor {
    parser: Arc<dyn SourceParser>,
    pool_size: usize,
}

impl ParallelIngestor {
    pub fn new(parser: Arc<dyn SourceParser>, config: &ReconcileConfig) -> Self {
        Self {
            parser,
            pool_size: config.pool_size.max(1),
        }
    }

    /// Parse all statement files concurrently and return one flattened,
    /// input-ordered record sequence.
    ///
    /// An empty path list returns an empty sequence without spawning any
    /// threads.
    pub fn parse_statement_files(
        &self,
        paths: &[PathBuf],
        range: DateRange,
    ) -> Result<Vec<StatementRecord>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        info!(files = paths.len(), workers = self.pool_size, "parsing statement files in parallel");

        let workers = self.pool_size.min(paths.len());
        let next_task = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next_task = &next_task;
                let parser = &self.parser;
                scope.spawn(move || loop {
                    let index = next_task.fetch_add(1, Ordering::SeqCst);
                    if index >= paths.len() {
                        break;
                    }
                    let path = &paths[index];
                    debug!(path = %path.display(), "parsing statement file");
                    let result = parser.parse_statements(path, range);
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                });
            }
        });
        drop(tx);

        // All workers have joined; collect per-file results back into input
        // order before checking for failures.
        let mut slots: Vec<Option<Result<Vec<StatementRecord>>>> =
            paths.iter().map(|_| None).collect();
        for (index, result) in rx {
            slots[index] = Some(result);
        }

        let mut records = Vec::new();
        for (path, slot) in paths.iter().zip(slots) {
            let result = slot.unwrap_or_else(|| {
                Err(Error::ParallelParse {
                    path: path.clone(),
                    detail: "parse task produced no result".to_string(),
                })
            });
            match result {
                Ok(parsed) => records.extend(parsed),
                Err(e) => {
                    return Err(Error::ParallelParse {
                        path: path.clone(),
                        detail: e.to_string(),
                    });
                }
            }
        }

        info!(records = records.len(), files = paths.len(), "parallel ingest complete");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::adapters::CsvSourceParser;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn full_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    fn ingestor(pool_size: usize) -> ParallelIngestor {
        let config = ReconcileConfig::default().with_pool_size(pool_size);
        ParallelIngestor::new(Arc::new(CsvSourceParser::new()), &config)
    }

    #[test]
    fn test_empty_input_spawns_nothing() {
        let records = ingestor(4).parse_statement_files(&[], full_range()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_results_follow_input_path_order() {
        let dir = TempDir::new().unwrap();
        let a = write_file(
            &dir,
            "bca.csv",
            "id,amount,date,bank\nA1,-100,2024-01-10,BCA\nA2,-200,2024-01-11,BCA\n",
        );
        let b = write_file(
            &dir,
            "mandiri.csv",
            "id,amount,date,bank\nB1,300,2024-01-10,Mandiri\n",
        );
        let c = write_file(
            &dir,
            "bni.csv",
            "id,amount,date,bank\nC1,-400,2024-01-12,BNI\nC2,500,2024-01-13,BNI\n",
        );

        let paths = vec![a, b, c];
        let records = ingestor(2).parse_statement_files(&paths, full_range()).unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "B1", "C1", "C2"]);
    }

    #[test]
    fn test_matches_sequential_parse() {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for i in 0..6 {
            paths.push(write_file(
                &dir,
                &format!("bank_{}.csv", i),
                &format!("id,amount,date,bank\nR{i},-{}00,2024-01-10,Bank{i}\n", i + 1),
            ));
        }

        let parser = CsvSourceParser::new();
        let mut sequential = Vec::new();
        for path in &paths {
            sequential.extend(parser.parse_statements(path, full_range()).unwrap());
        }

        let parallel = ingestor(3).parse_statement_files(&paths, full_range()).unwrap();

        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            assert_eq!(p.id, s.id);
            assert_eq!(p.amount, s.amount);
        }
    }

    #[test]
    fn test_one_failure_aborts_the_ingest() {
        let dir = TempDir::new().unwrap();
        let good = write_file(
            &dir,
            "good.csv",
            "id,amount,date,bank\nG1,-100,2024-01-10,BCA\n",
        );
        let missing = dir.path().join("missing.csv");

        let err = ingestor(4)
            .parse_statement_files(&[good, missing.clone()], full_range())
            .unwrap_err();

        match err {
            Error::ParallelParse { path, .. } => assert_eq!(path, missing),
            other => panic!("expected ParallelParse, got {other:?}"),
        }
    }

    #[test]
    fn test_single_worker_pool_still_completes() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.csv", "id,amount,date,bank\nA1,-1,2024-01-10,BCA\n");
        let b = write_file(&dir, "b.csv", "id,amount,date,bank\nB1,-2,2024-01-10,BNI\n");

        let records = ingestor(1).parse_statement_files(&[a, b], full_range()).unwrap();
        assert_eq!(records.len(), 2);
    }
}

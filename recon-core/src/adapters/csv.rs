//! CSV source parser adapter
//!
//! Reference [`SourceParser`] implementation over the reconciliation CSV
//! formats:
//!
//! - ledger: `id,amount,direction,timestamp`
//!   (`TRX20240110001,5000000,OUT,2024-01-10T14:30:00`)
//! - statement: `id,amount,date,bank`
//!   (`BCA2024011001,-5000000,2024-01-10,BCA`)
//!
//! Structural problems (missing file, wrong header) are fatal for the file;
//! individual malformed rows are skipped with a warning so one corrupt line
//! never aborts a whole run.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{DateRange, Direction, LedgerTransaction, StatementRecord};
use crate::ports::{SourceParser, StatementStream};

const LEDGER_HEADER: [&str; 4] = ["id", "amount", "direction", "timestamp"];
const STATEMENT_HEADER: [&str; 4] = ["id", "amount", "date", "bank"];

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// CSV-backed source parser
#[derive(Debug, Default, Clone)]
pub struct CsvSourceParser;

impl CsvSourceParser {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, path: &Path) -> Result<csv::Reader<File>> {
        let file = File::open(path).map_err(|e| Error::source_unavailable(path, e))?;
        Ok(csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file))
    }
}

impl SourceParser for CsvSourceParser {
    fn parse_ledger(&self, path: &Path, range: DateRange) -> Result<Vec<LedgerTransaction>> {
        let mut reader = self.open(path)?;
        validate_header(path, &mut reader, &LEDGER_HEADER)?;

        let mut transactions = Vec::new();
        let mut skipped = 0usize;

        for (i, result) in reader.records().enumerate() {
            let line = i + 2; // 1-indexed, after the header row
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(path = %path.display(), line, error = %e, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            match parse_ledger_row(&record) {
                Ok(tx) => {
                    if range.contains(tx.date()) {
                        transactions.push(tx);
                    }
                }
                Err(detail) => {
                    warn!(path = %path.display(), line, %detail, "skipping invalid ledger row");
                    skipped += 1;
                }
            }
        }

        debug!(
            path = %path.display(),
            parsed = transactions.len(),
            skipped,
            "parsed ledger file"
        );
        Ok(transactions)
    }

    fn parse_statements(&self, path: &Path, range: DateRange) -> Result<Vec<StatementRecord>> {
        let mut reader = self.open(path)?;
        validate_header(path, &mut reader, &STATEMENT_HEADER)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (i, result) in reader.records().enumerate() {
            let line = i + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(path = %path.display(), line, error = %e, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            match parse_statement_row(&record) {
                Ok(rec) => {
                    if range.contains(rec.date) {
                        records.push(rec);
                    }
                }
                Err(detail) => {
                    warn!(path = %path.display(), line, %detail, "skipping invalid statement row");
                    skipped += 1;
                }
            }
        }

        debug!(
            path = %path.display(),
            parsed = records.len(),
            skipped,
            "parsed statement file"
        );
        Ok(records)
    }

    fn stream_statements(&self, path: &Path) -> Result<StatementStream> {
        let mut reader = self.open(path)?;
        validate_header(path, &mut reader, &STATEMENT_HEADER)?;

        Ok(Box::new(StatementRows {
            records: reader.into_records(),
            path: path.to_path_buf(),
            line: 1,
        }))
    }
}

/// Owned row iterator backing [`SourceParser::stream_statements`].
struct StatementRows {
    records: csv::StringRecordsIntoIter<File>,
    path: PathBuf,
    line: usize,
}

impl Iterator for StatementRows {
    type Item = Result<StatementRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.line += 1;

        Some(match result {
            Ok(record) => parse_statement_row(&record).map_err(|detail| {
                Error::invalid_format(&self.path, format!("row {}: {}", self.line, detail))
            }),
            Err(e) => Err(Error::invalid_format(
                &self.path,
                format!("row {}: {}", self.line, e),
            )),
        })
    }
}

fn validate_header(path: &Path, reader: &mut csv::Reader<File>, expected: &[&str]) -> Result<()> {
    let headers = reader
        .headers()
        .map_err(|e| Error::invalid_format(path, e.to_string()))?;

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(Error::invalid_format(path, "file is empty"));
    }

    if headers.len() != expected.len() || !headers.iter().zip(expected).all(|(h, e)| h == *e) {
        return Err(Error::invalid_format(
            path,
            format!(
                "unexpected header [{}], expected [{}]",
                headers.iter().collect::<Vec<_>>().join(","),
                expected.join(",")
            ),
        ));
    }

    Ok(())
}

fn parse_ledger_row(record: &StringRecord) -> std::result::Result<LedgerTransaction, String> {
    if record.len() < 4 {
        return Err(format!("expected 4 columns, got {}", record.len()));
    }

    let id = record[0].to_string();
    if id.is_empty() {
        return Err("missing id".to_string());
    }

    let amount: Decimal = record[1]
        .parse()
        .map_err(|_| format!("invalid amount '{}'", &record[1]))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("ledger amount must be non-negative, got '{}'", &record[1]));
    }

    let direction = Direction::parse(&record[2])
        .ok_or_else(|| format!("invalid direction '{}'", &record[2]))?;

    let timestamp = parse_timestamp(&record[3])
        .ok_or_else(|| format!("invalid timestamp '{}'", &record[3]))?;

    Ok(LedgerTransaction::new(id, amount, direction, timestamp))
}

fn parse_statement_row(record: &StringRecord) -> std::result::Result<StatementRecord, String> {
    if record.len() < 4 {
        return Err(format!("expected 4 columns, got {}", record.len()));
    }

    let id = record[0].to_string();
    if id.is_empty() {
        return Err("missing id".to_string());
    }

    let amount: Decimal = record[1]
        .parse()
        .map_err(|_| format!("invalid amount '{}'", &record[1]))?;

    let date = NaiveDate::parse_from_str(&record[2], "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'", &record[2]))?;

    let bank = match record[3].trim() {
        "" => None,
        name => Some(name.to_string()),
    };

    Ok(StatementRecord::new(id, amount, date, bank))
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn full_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_parse_ledger_happy_path() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\n\
             TRX001,5000000,OUT,2024-01-10T14:30:00\n\
             TRX002,250.75,IN,2024-01-11 09:15:00\n",
        );

        let parser = CsvSourceParser::new();
        let txs = parser.parse_ledger(&path, full_range()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, "TRX001");
        assert_eq!(txs[0].direction, Direction::Out);
        assert_eq!(txs[1].amount, "250.75".parse().unwrap());
    }

    #[test]
    fn test_parse_ledger_accepts_debit_credit_vocabulary() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\n\
             TRX001,100,DEBIT,2024-01-10T14:30:00\n\
             TRX002,200,CREDIT,2024-01-10T15:00:00\n",
        );

        let parser = CsvSourceParser::new();
        let txs = parser.parse_ledger(&path, full_range()).unwrap();

        assert_eq!(txs[0].direction, Direction::Out);
        assert_eq!(txs[1].direction, Direction::In);
    }

    #[test]
    fn test_parse_ledger_applies_date_filter() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\n\
             TRX001,100,OUT,2024-01-10T14:30:00\n\
             TRX002,200,OUT,2024-03-10T14:30:00\n",
        );

        let parser = CsvSourceParser::new();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let txs = parser.parse_ledger(&path, range).unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id, "TRX001");
    }

    #[test]
    fn test_parse_ledger_skips_invalid_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ledger.csv",
            "id,amount,direction,timestamp\n\
             TRX001,not-a-number,OUT,2024-01-10T14:30:00\n\
             TRX002,100,SIDEWAYS,2024-01-10T14:30:00\n\
             TRX003,-100,OUT,2024-01-10T14:30:00\n\
             TRX004,100,OUT,2024-01-10T14:30:00\n",
        );

        let parser = CsvSourceParser::new();
        let txs = parser.parse_ledger(&path, full_range()).unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id, "TRX004");
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let parser = CsvSourceParser::new();
        let err = parser
            .parse_ledger(Path::new("/nonexistent/ledger.csv"), full_range())
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_wrong_header_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "foo,bar,baz,qux\nTRX001,100,OUT,2024-01-10T14:30:00\n",
        );

        let parser = CsvSourceParser::new();
        let err = parser.parse_ledger(&path, full_range()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_header_only_file_yields_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", "id,amount,date,bank\n");

        let parser = CsvSourceParser::new();
        let records = parser.parse_statements(&path, full_range()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_statements_empty_bank_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bank.csv",
            "id,amount,date,bank\n\
             B1,-5000000,2024-01-10,BCA\n\
             B2,1000,2024-01-11,\n",
        );

        let parser = CsvSourceParser::new();
        let records = parser.parse_statements(&path, full_range()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bank.as_deref(), Some("BCA"));
        assert_eq!(records[1].bank, None);
    }

    #[test]
    fn test_stream_yields_row_errors_as_items() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bank.csv",
            "id,amount,date,bank\n\
             B1,-5000000,2024-01-10,BCA\n\
             B2,garbage,2024-01-11,BCA\n\
             B3,750,2024-01-12,Mandiri\n",
        );

        let parser = CsvSourceParser::new();
        let rows: Vec<_> = parser.stream_statements(&path).unwrap().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
        assert_eq!(rows[2].as_ref().unwrap().id, "B3");
    }

    #[test]
    fn test_stream_rejects_bad_header_eagerly() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.csv", "a,b,c,d\nB1,-100,2024-01-10,BCA\n");

        let parser = CsvSourceParser::new();
        assert!(parser.stream_statements(&path).is_err());
    }
}

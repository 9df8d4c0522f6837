//! Bank statement record domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::MatchingKey;

/// A single record from a bank statement
///
/// Unlike the ledger side, statement amounts are already signed
/// (negative = money out, positive = money in) and the date carries no
/// time component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Bank-assigned identifier; format varies by institution and never
    /// matches the internal ledger id
    pub id: String,
    /// Signed amount in the bank's convention
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Issuing institution name, when the statement provides one
    pub bank: Option<String>,
}

impl StatementRecord {
    pub fn new(
        id: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        bank: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            date,
            bank,
        }
    }

    /// Key used for exact matching against ledger transactions.
    pub fn matching_key(&self) -> MatchingKey {
        MatchingKey::new(self.amount, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_key_format() {
        let rec = StatementRecord::new(
            "BCA2024011001",
            Decimal::new(-5_000_000, 0),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Some("BCA".to_string()),
        );
        assert_eq!(rec.matching_key().as_str(), "-5000000_2024-01-10");
    }

    #[test]
    fn test_keys_agree_with_ledger_side() {
        use crate::domain::{Direction, LedgerTransaction};

        let tx = LedgerTransaction::new(
            "TRX001",
            Decimal::new(1_250_075, 2), // 12500.75
            Direction::Out,
            chrono::NaiveDateTime::parse_from_str("2024-01-10T09:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
        );
        let rec = StatementRecord::new(
            "MND123",
            "-12500.75".parse().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Some("Mandiri".to_string()),
        );
        assert_eq!(tx.matching_key(), rec.matching_key());
    }
}

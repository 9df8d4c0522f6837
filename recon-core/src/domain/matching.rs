//! Matching key and match outcome value objects

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{LedgerTransaction, StatementRecord};

/// Composite key used as the sole equality criterion for exact matching.
///
/// Rendered as `"{amount}_{date}"` where the amount is the signed decimal
/// with trailing fractional zeros stripped (so `100` and `100.00` produce
/// the same key, and zero always renders `0`) and the date is `YYYY-MM-DD`.
/// Comparison is exact equality, never numeric tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingKey(String);

impl MatchingKey {
    pub fn new(amount: Decimal, date: chrono::NaiveDate) -> Self {
        // normalize() drops redundant scale and maps -0 to 0; no digits are
        // ever rounded away
        Self(format!("{}_{}", amount.normalize(), date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A successfully matched ledger transaction / statement record pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    pub ledger: LedgerTransaction,
    pub statement: StatementRecord,
    /// Absolute difference between the normalized ledger amount and the
    /// statement amount. Always zero for exact matches; kept as data so a
    /// future tolerance-matching mode can report real discrepancies.
    pub discrepancy: Decimal,
    /// Match confidence, 0-100. Exact matches are always 100.
    pub confidence: f64,
}

impl MatchedPair {
    /// Build a pair produced by exact matching: zero discrepancy, full
    /// confidence.
    pub fn exact(ledger: LedgerTransaction, statement: StatementRecord) -> Self {
        Self {
            ledger,
            statement,
            discrepancy: Decimal::ZERO,
            confidence: 100.0,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.discrepancy.is_zero()
    }

    /// Recompute the discrepancy from the underlying records, for verifying
    /// the stored value.
    pub fn amount_discrepancy(&self) -> Decimal {
        (self.ledger.normalized_amount() - self.statement.amount).abs()
    }
}

/// Complete partition of a reconciliation run's inputs.
///
/// Every input ledger transaction lands in exactly one of `matches` or
/// `unmatched_ledger`; every input statement record lands in exactly one of
/// `matches` or `unmatched_statements`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchedPair>,
    pub unmatched_ledger: Vec<LedgerTransaction>,
    pub unmatched_statements: Vec<StatementRecord>,
}

impl MatchOutcome {
    pub fn matched_count(&self) -> usize {
        self.matches.len()
    }

    pub fn unmatched_count(&self) -> usize {
        self.unmatched_ledger.len() + self.unmatched_statements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_key_renders_zero_without_scale() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let key = MatchingKey::new("0.00".parse().unwrap(), date);
        assert_eq!(key.as_str(), "0_2024-01-10");

        let negative_zero = MatchingKey::new("-0.00".parse().unwrap(), date);
        assert_eq!(negative_zero, key);
    }

    #[test]
    fn test_key_ignores_redundant_scale() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let plain = MatchingKey::new("1000000".parse().unwrap(), date);
        let scaled = MatchingKey::new("1000000.00".parse().unwrap(), date);
        assert_eq!(plain, scaled);
    }

    #[test]
    fn test_key_preserves_large_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let key = MatchingKey::new("999999999999999.99".parse().unwrap(), date);
        assert_eq!(key.as_str(), "999999999999999.99_2024-01-10");
    }

    #[test]
    fn test_key_distinguishes_close_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let a = MatchingKey::new("-5000000".parse().unwrap(), date);
        let b = MatchingKey::new("-4999000".parse().unwrap(), date);
        assert_ne!(a, b);
    }
}

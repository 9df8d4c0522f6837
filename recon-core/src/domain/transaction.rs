//! Ledger transaction domain model

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::MatchingKey;

/// Money flow direction of a ledger transaction.
///
/// The ledger stores amounts as non-negative magnitudes; the direction
/// carries the sign. Bank statements use signed amounts instead, so
/// [`LedgerTransaction::normalized_amount`] converts to that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Money leaving the account (disbursement, payout, fee)
    Out,
    /// Money entering the account (repayment, funding, interest)
    In,
}

impl Direction {
    /// Parse a direction token from a source file.
    ///
    /// Accepts the canonical `OUT`/`IN` as well as the banking-convention
    /// aliases `DEBIT`/`CREDIT`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OUT" | "DEBIT" => Some(Direction::Out),
            "IN" | "CREDIT" => Some(Direction::In),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Out => "OUT",
            Direction::In => "IN",
        }
    }
}

/// A single transaction from the internal system ledger
///
/// The ledger id never matches bank-side identifiers (different formats
/// across institutions), so matching is done purely on the business key of
/// normalized amount + date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Internal transaction ID (e.g. "TRX20240110001")
    pub id: String,
    /// Transaction amount, always non-negative; sign comes from `direction`
    pub amount: Decimal,
    pub direction: Direction,
    /// Full datetime the transaction was recorded, with time component
    pub timestamp: NaiveDateTime,
}

impl LedgerTransaction {
    pub fn new(
        id: impl Into<String>,
        amount: Decimal,
        direction: Direction,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            direction,
            timestamp,
        }
    }

    /// Signed amount in the bank statement convention.
    ///
    /// `Out` negates the magnitude, `In` keeps it positive, which makes the
    /// value directly comparable with [`StatementRecord::amount`].
    ///
    /// [`StatementRecord::amount`]: crate::domain::StatementRecord
    pub fn normalized_amount(&self) -> Decimal {
        match self.direction {
            Direction::Out => -self.amount,
            Direction::In => self.amount,
        }
    }

    /// Date portion of the timestamp; statements carry dates only, so the
    /// time component never participates in matching.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Key used for exact matching against bank statement records.
    pub fn matching_key(&self) -> MatchingKey {
        MatchingKey::new(self.normalized_amount(), self.date())
    }
}

//! Core domain entities
//!
//! All business entities are defined here. These are pure, immutable value
//! objects created once per reconciliation run - no I/O or external
//! dependencies.

mod matching;
mod range;
mod statement;
mod summary;
mod transaction;
pub mod result;

pub use matching::{MatchOutcome, MatchedPair, MatchingKey};
pub use range::DateRange;
pub use statement::StatementRecord;
pub use summary::{Summary, UNKNOWN_BANK};
pub use transaction::{Direction, LedgerTransaction};

//! Exact matcher - hashmap-based reconciliation core
//!
//! Matches ledger transactions against bank statement records on the
//! business key of normalized amount + date. Ids never participate: they
//! differ in format between the internal system and every bank.
//!
//! Time is O(n + m) for n ledger transactions and m statement records;
//! space is O(n) for the key index.

use std::collections::{HashMap, HashSet};

use crate::domain::{LedgerTransaction, MatchOutcome, MatchedPair, MatchingKey, StatementRecord};

/// Exact matching engine
///
/// Pure computation over the provided slices; no I/O, no shared state. The
/// key index lives only for the duration of one `match_records` call.
#[derive(Debug, Default, Clone)]
pub struct ExactMatcher;

impl ExactMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Partition the inputs into matches and per-side unmatched lists.
    ///
    /// Index building keeps the FIRST ledger transaction seen per key;
    /// later transactions with an identical key are never matchable, even
    /// against a compatible statement record, and end up unmatched. Probing
    /// pops the index entry so each ledger transaction matches at most one
    /// statement record.
    ///
    /// Both unmatched lists preserve their side's input order. Empty inputs
    /// are valid and produce an empty outcome.
    pub fn match_records(
        &self,
        ledger: &[LedgerTransaction],
        statements: &[StatementRecord],
    ) -> MatchOutcome {
        let mut index = build_ledger_index(ledger);
        let mut matched_ids: HashSet<String> = HashSet::new();

        let mut matches = Vec::new();
        let mut unmatched_statements = Vec::new();

        for record in statements {
            match index.remove(&record.matching_key()) {
                Some(transaction) => {
                    matched_ids.insert(transaction.id.clone());
                    matches.push(MatchedPair::exact(transaction, record.clone()));
                }
                None => unmatched_statements.push(record.clone()),
            }
        }

        let unmatched_ledger = ledger
            .iter()
            .filter(|tx| !matched_ids.contains(&tx.id))
            .cloned()
            .collect();

        MatchOutcome {
            matches,
            unmatched_ledger,
            unmatched_statements,
        }
    }
}

/// Build the key index over ledger transactions, first-wins on collisions.
pub(crate) fn build_ledger_index(
    ledger: &[LedgerTransaction],
) -> HashMap<MatchingKey, LedgerTransaction> {
    let mut index = HashMap::with_capacity(ledger.len());
    for transaction in ledger {
        index
            .entry(transaction.matching_key())
            .or_insert_with(|| transaction.clone());
    }
    index
}

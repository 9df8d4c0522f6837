//! Recon Core - ledger vs bank statement reconciliation
//!
//! This crate implements the reconciliation engine following hexagonal
//! architecture:
//!
//! - **domain**: Core business entities (LedgerTransaction, StatementRecord,
//!   MatchOutcome, Summary, etc.)
//! - **ports**: Trait definitions for external collaborators (SourceParser,
//!   MatchSink)
//! - **services**: Business logic orchestration (exact matching, parallel
//!   ingestion, streaming matching, summary aggregation)
//! - **adapters**: Concrete implementations (CSV parsing, CSV/in-memory
//!   sinks)
//!
//! Matching is exact: a ledger transaction and a statement record pair up
//! iff their normalized amount + date keys are identical. The engine is
//! O(n+m) in the batch path and O(ledger) memory in the streaming path.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use adapters::CsvSourceParser;
use services::{ReconcileService, StreamingMatcher};

// Re-export commonly used types at crate root
pub use config::ReconcileConfig;
pub use domain::result::{Error, Result};
pub use domain::{
    DateRange, Direction, LedgerTransaction, MatchOutcome, MatchedPair, MatchingKey,
    StatementRecord, Summary, UNKNOWN_BANK,
};

/// Main context for reconciliation operations
///
/// Primary entry point for callers: wires the CSV parser adapter into the
/// batch and streaming services. Callers that bring their own
/// [`SourceParser`] implementation can construct the services directly
/// instead.
///
/// [`SourceParser`]: ports::SourceParser
pub struct ReconcileContext {
    pub config: ReconcileConfig,
    pub reconcile_service: ReconcileService,
    pub streaming_matcher: StreamingMatcher,
}

impl ReconcileContext {
    /// Create a context over CSV source files
    pub fn new(config: ReconcileConfig) -> Self {
        let parser = Arc::new(CsvSourceParser::new());

        let reconcile_service = ReconcileService::new(parser.clone(), &config);
        let streaming_matcher = StreamingMatcher::new(parser);

        Self {
            config,
            reconcile_service,
            streaming_matcher,
        }
    }
}

impl Default for ReconcileContext {
    fn default() -> Self {
        Self::new(ReconcileConfig::default())
    }
}

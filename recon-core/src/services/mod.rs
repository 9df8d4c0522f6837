//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one stage of the reconciliation flow.

mod ingest;
mod matcher;
mod reconcile;
mod streaming;
mod summary;

pub use ingest::ParallelIngestor;
pub use matcher::ExactMatcher;
pub use reconcile::ReconcileService;
pub use streaming::{StreamingMatcher, StreamingStats};
pub use summary::summarize;

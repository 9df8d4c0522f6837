//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The services
//! depend only on these traits, not on concrete implementations.

mod parser;
mod sink;

pub use parser::{SourceParser, StatementStream};
pub use sink::MatchSink;

//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - CSV files for the SourceParser port
//! - CSV output files for the MatchSink port (streaming runs)
//! - An in-memory MatchSink for tests and programmatic callers

pub mod csv;
pub mod csv_sink;
pub mod memory;

pub use self::csv::CsvSourceParser;
pub use csv_sink::CsvSink;
pub use memory::MemorySink;

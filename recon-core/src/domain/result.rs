//! Result and error types for the core library

use std::path::PathBuf;

use thiserror::Error;

/// Core library error type
///
/// A reconciliation run either produces a complete summary or fails with
/// exactly one of these; there is no partial-success result. Row-level
/// format problems inside a file never surface here - the parsing loops
/// skip them with a warning.
#[derive(Error, Debug)]
pub enum Error {
    /// Source file is missing or unreadable. Aborts the run, never retried.
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem with a source file (wrong header, empty file).
    /// Fatal for that file, unlike row-level errors.
    #[error("invalid format in {path}: {detail}")]
    InvalidFormat { path: PathBuf, detail: String },

    /// A parallel parse task failed; the whole ingest is aborted and
    /// sibling results are discarded even if they succeeded.
    #[error("parallel parse failed for {path}: {detail}")]
    ParallelParse { path: PathBuf, detail: String },

    /// A sink collaborator rejected a write.
    #[error("sink error: {0}")]
    Sink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a source-unavailable error
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-format error
    pub fn invalid_format(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create a sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_path() {
        let err = Error::invalid_format("bank_a.csv", "unexpected header");
        let msg = err.to_string();
        assert!(msg.contains("bank_a.csv"));
        assert!(msg.contains("unexpected header"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

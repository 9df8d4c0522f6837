//! Configuration management
//!
//! All tunables live in an explicit config struct that callers construct
//! and pass down; nothing in the crate reads process-wide state behind the
//! caller's back. `from_env` exists for the CLI's convenience and only
//! layers environment overrides on top of the defaults.

use serde::{Deserialize, Serialize};

/// Default worker count for the parallel ingest coordinator. Sized for the
/// typical 2-8 statement files per run.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Reconciliation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Worker threads used when parsing multiple statement files
    pub pool_size: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl ReconcileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the ingest pool size; values below 1 are clamped to 1.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    /// Defaults with environment overrides applied
    /// (`RECON_POOL_SIZE` for the ingest pool).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(pool_size) = std::env::var("RECON_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config = config.with_pool_size(pool_size);
        }
        config
    }
}

//! Error types for the slot scheduler.
//!
//! Admission itself never fails: capacity shortfalls are retries and
//! out-of-horizon slots are ordinary lookups. Errors only come from
//! configuration and snapshot export.

use thiserror::Error;

/// Errors produced outside the admission path.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration failed validation or could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Writing an export failed.
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
    /// Snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

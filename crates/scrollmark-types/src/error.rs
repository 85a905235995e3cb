//! Error types for scrollmark.

use std::io;

/// Errors produced by the scrollmark crates.
#[derive(Debug, thiserror::Error)]
pub enum ScrollmarkError {
    #[error("config error: {0}")]
    Config(String),

    #[error("metrics unavailable: {0}")]
    MetricsUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrollmarkError {
    /// True for errors that only invalidate the current sample.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::MetricsUnavailable(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ScrollmarkError>;

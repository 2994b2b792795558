//! Error types for surf.

use std::io;
use std::path::PathBuf;

/// Errors produced by the surf session engine and command layer.
#[derive(Debug, thiserror::Error)]
pub enum SurfError {
    #[error("allocation failed: {0}")]
    Allocation(String),

    #[error("maximum tabs reached ({capacity} open)")]
    CapacityExceeded { capacity: usize },

    #[error("invalid index {index} (expected 1-{max})")]
    InvalidIndex { index: usize, max: usize },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SurfError {
    /// Wrap an I/O failure on the persisted store.
    pub fn store(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Store {
            path: path.into(),
            source,
        }
    }

    /// Whether this is an expected "nothing there" condition rather than a
    /// failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SurfError>;

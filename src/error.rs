//! Error types for the file cache
//!
//! Provides unified error handling using thiserror. Missing or stale entries
//! are not errors; they come back as `None`/`false` from the cache itself.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the file cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Base directory is unusable
    #[error("Invalid cache directory {path:?}: {reason}")]
    BaseDir { path: PathBuf, reason: String },

    /// Category or key would address a file outside the base directory
    #[error("Invalid cache name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Underlying filesystem failure
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored content requested as text is not UTF-8
    #[error("Cached content in {path:?} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },
}

impl CacheError {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the file cache.
pub type Result<T> = std::result::Result<T, CacheError>;

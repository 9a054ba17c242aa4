//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default base directory when none is configured
pub const DEFAULT_BASE_PATH: &str = "./cache";

/// Cache configuration parameters.
///
/// Built once at startup and handed to [`crate::FileCache::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding every cache file
    pub base_path: PathBuf,
    /// Emit one diagnostic log line per operation
    pub debug: bool,
    /// Create the base directory if it does not exist
    pub create_dir: bool,
}

impl Config {
    /// Creates a config for `base_path` with every other setting at its default.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Sets the debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets whether a missing base directory is created.
    pub fn with_create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FILE_CACHE_DIR` - Base directory (default: `./cache`)
    /// - `FILE_CACHE_DEBUG` - Per-operation diagnostics (default: false)
    /// - `FILE_CACHE_CREATE_DIR` - Create a missing base directory (default: false)
    pub fn from_env() -> Self {
        Self {
            base_path: env::var("FILE_CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_PATH)),
            debug: env::var("FILE_CACHE_DEBUG")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            create_dir: env::var("FILE_CACHE_CREATE_DIR")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            debug: false,
            create_dir: false,
        }
    }
}

/// Parses a boolean env flag; unrecognised values yield `None`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

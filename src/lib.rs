//! File Cache - a flat-directory key/value cache
//!
//! Stores opaque content under a `(category, key)` pair, one file per entry,
//! with optional max-age checks at read time and bulk deletion by category,
//! substring match, or everything.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{sanitize_key, CacheStats, EntryName, FileCache};
pub use config::Config;
pub use error::{CacheError, Result};

//! Cache Module
//!
//! Provides the file-backed cache: one file per `(category, key)` entry,
//! stored flat in a single base directory.

mod entry;
mod sanitize;
mod stats;
mod store;


// Re-export public types
pub use entry::{is_fresh, EntryName};
pub use sanitize::sanitize_key;
pub use stats::CacheStats;
pub use store::FileCache;

// == Public Constants ==
/// Extension appended to every cache file name
pub const CACHE_EXTENSION: &str = "cache";

//! Cache Entry Module
//!
//! Maps `(category, key)` pairs to file names and decides read-time freshness.

use chrono::{DateTime, TimeDelta, Utc};

use crate::cache::CACHE_EXTENSION;
use crate::error::{CacheError, Result};

// == Entry Name ==
/// Identity of a single cache entry.
///
/// The on-disk name is `<category>.<key>.cache`. There is no escaping, so a
/// category containing `.` yields a name that cannot be split back apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName {
    /// Namespace grouping related entries
    pub category: String,
    /// Identifier unique within the category
    pub key: String,
}

impl EntryName {
    // == Constructor ==
    pub fn new(category: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
        }
    }

    // == File Name ==
    /// Returns the file name this entry is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.{}.{}", self.category, self.key, CACHE_EXTENSION)
    }

    // == Parse ==
    /// Recovers an entry name from a cache file name.
    ///
    /// Splits at the first `.`; returns `None` for names without the cache
    /// extension or without a category separator.
    #[cfg(test)]
    pub(crate) fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name
            .strip_suffix(CACHE_EXTENSION)?
            .strip_suffix('.')?;
        let (category, key) = stem.split_once('.')?;
        Some(Self::new(category, key))
    }

    // == Validate ==
    /// Rejects parts that would resolve outside the base directory.
    pub fn validate(&self) -> Result<()> {
        validate_part(&self.category)?;
        validate_part(&self.key)
    }
}

fn validate_part(part: &str) -> Result<()> {
    if part.contains(['/', '\\']) {
        return Err(CacheError::InvalidName {
            name: part.to_string(),
            reason: "contains a path separator",
        });
    }
    if part.contains('\0') {
        return Err(CacheError::InvalidName {
            name: part.to_string(),
            reason: "contains a NUL byte",
        });
    }
    Ok(())
}

// == Freshness ==
/// Checks whether an entry modified at `modified` is still fresh at `now`.
///
/// Fresh strictly before the deadline: `now < modified + max_age`. A deadline
/// past the representable range never expires.
pub fn is_fresh(modified: DateTime<Utc>, max_age_secs: u64, now: DateTime<Utc>) -> bool {
    let deadline = i64::try_from(max_age_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|max_age| modified.checked_add_signed(max_age));

    match deadline {
        Some(deadline) => now < deadline,
        None => true,
    }
}

//! Cache Store Module
//!
//! Reads, writes and deletes cache files in the configured base directory.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::stats::StatsRecorder;
use crate::cache::{is_fresh, CacheStats, EntryName};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == File Cache ==
/// File-backed cache over a single flat directory.
///
/// Every operation is a blocking filesystem call. Nothing coordinates
/// concurrent writers of the same entry, within or across processes.
#[derive(Debug)]
pub struct FileCache {
    /// Base directory, debug flag
    config: Config,
    /// Read/write/removal counters
    stats: StatsRecorder,
}

impl FileCache {
    // == Constructor ==
    /// Opens a cache over `config.base_path`.
    ///
    /// The directory must already exist unless `config.create_dir` is set.
    pub fn new(config: Config) -> Result<Self> {
        let base = &config.base_path;

        if config.create_dir {
            fs::create_dir_all(base).map_err(|e| CacheError::io(base, e))?;
        }

        match fs::metadata(base) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(CacheError::BaseDir {
                    path: base.clone(),
                    reason: "not a directory".to_string(),
                })
            }
            Err(e) => {
                return Err(CacheError::BaseDir {
                    path: base.clone(),
                    reason: e.to_string(),
                })
            }
        }

        info!(
            base_path = %base.display(),
            debug = config.debug,
            "File cache initialized"
        );

        Ok(Self {
            config,
            stats: StatsRecorder::default(),
        })
    }

    /// Returns the configuration this cache was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the directory holding the cache files.
    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    /// Resolves the file path of an entry.
    pub fn path_for(&self, category: &str, key: &str) -> Result<PathBuf> {
        let name = EntryName::new(category, key);
        name.validate()?;
        Ok(self.config.base_path.join(name.file_name()))
    }

    // == Get ==
    /// Retrieves an entry as text.
    ///
    /// With `max_age` (seconds) the entry is returned only while
    /// `now < mtime + max_age`. Absent and stale entries yield `Ok(None)`.
    pub fn get(&self, category: &str, key: &str, max_age: Option<u64>) -> Result<Option<String>> {
        self.get_at(category, key, max_age, Utc::now())
    }

    /// Like [`FileCache::get`], judging freshness against `now`.
    pub fn get_at(
        &self,
        category: &str,
        key: &str,
        max_age: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        if self.config.debug {
            debug!(category, key, ?max_age, "Get from file cache");
        }

        let path = self.path_for(category, key)?;
        match self.read_entry(&path, max_age, now)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| CacheError::InvalidUtf8 { path }),
            None => Ok(None),
        }
    }

    /// Retrieves an entry's raw bytes.
    pub fn get_bytes(
        &self,
        category: &str,
        key: &str,
        max_age: Option<u64>,
    ) -> Result<Option<Vec<u8>>> {
        self.get_bytes_at(category, key, max_age, Utc::now())
    }

    /// Like [`FileCache::get_bytes`], judging freshness against `now`.
    pub fn get_bytes_at(
        &self,
        category: &str,
        key: &str,
        max_age: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<u8>>> {
        if self.config.debug {
            debug!(category, key, ?max_age, "Get bytes from file cache");
        }

        let path = self.path_for(category, key)?;
        self.read_entry(&path, max_age, now)
    }

    fn read_entry(
        &self,
        path: &Path,
        max_age: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<u8>>> {
        if let Some(max_age) = max_age {
            let modified = match fs::metadata(path) {
                Ok(meta) => meta.modified().map_err(|e| CacheError::io(path, e))?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    self.stats.record_miss();
                    return Ok(None);
                }
                Err(e) => return Err(CacheError::io(path, e)),
            };

            if !is_fresh(DateTime::<Utc>::from(modified), max_age, now) {
                self.stats.record_stale();
                return Ok(None);
            }
        }

        match fs::read(path) {
            Ok(content) => {
                self.stats.record_hit();
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.stats.record_miss();
                Ok(None)
            }
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    // == Put ==
    /// Stores `content`, creating or truncating the entry's file.
    ///
    /// Not atomic: a crash mid-write can leave partial content behind.
    pub fn put(&self, category: &str, key: &str, content: impl AsRef<[u8]>) -> Result<()> {
        let content = content.as_ref();

        if self.config.debug {
            debug!(category, key, size = content.len(), "Put into file cache");
        }

        let path = self.path_for(category, key)?;
        fs::write(&path, content).map_err(|e| CacheError::io(&path, e))?;
        self.stats.record_write();

        Ok(())
    }

    // == Delete Item ==
    /// Removes the entry for `(category, key)`; returns whether a file was removed.
    pub fn delete_item(&self, category: &str, key: &str) -> Result<bool> {
        if self.config.debug {
            debug!(category, key, "Delete cached item");
        }

        let path = self.path_for(category, key)?;
        let removed = remove_file(&path)?;
        if removed {
            self.stats.record_removals(1);
        }

        Ok(removed)
    }

    // == Delete Category ==
    /// Removes every file whose name contains `category`.
    ///
    /// Returns whether at least one file was removed.
    pub fn delete_category(&self, category: &str) -> Result<bool> {
        if self.config.debug {
            debug!(category, "Delete cached category");
        }

        let removed = self.remove_where(|name| name.contains(category))?;
        Ok(removed > 0)
    }

    // == Delete Matching ==
    /// Removes every file whose name contains `key`, or `category` when no
    /// key is given.
    ///
    /// Returns the number of files removed; zero matches is still success.
    pub fn delete_matching(&self, category: &str, key: Option<&str>) -> Result<usize> {
        if self.config.debug {
            debug!(category, ?key, "Delete cached items");
        }

        let search = key.unwrap_or(category);
        self.remove_where(|name| name.contains(search))
    }

    // == Delete All ==
    /// Removes every file in the base directory.
    ///
    /// Returns whether at least one file was removed.
    pub fn delete_all(&self) -> Result<bool> {
        if self.config.debug {
            debug!("Delete all cache");
        }

        let removed = self.remove_where(|_| true)?;
        Ok(removed > 0)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Scans the base directory and removes files whose name satisfies `matches`.
    ///
    /// Subdirectories are skipped. Returns the number of files removed.
    fn remove_where<F>(&self, matches: F) -> Result<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.scan_and_remove(matches, remove_file)
    }

    /// Removal counts are recorded per file, so an error part-way through a
    /// scan still leaves the stats matching what was deleted.
    fn scan_and_remove<F, R>(&self, matches: F, remove: R) -> Result<usize>
    where
        F: Fn(&str) -> bool,
        R: Fn(&Path) -> Result<bool>,
    {
        let base = &self.config.base_path;
        let entries = fs::read_dir(base).map_err(|e| CacheError::io(base, e))?;

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::io(base, e))?;
            let path = entry.path();

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                // Vanished since the listing was read
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(CacheError::io(&path, e)),
            };
            if file_type.is_dir() {
                debug!(path = %path.display(), "Skipping directory in cache scan");
                continue;
            }

            let file_name = entry.file_name();
            let name: Cow<'_, str> = file_name.to_string_lossy();
            if matches(name.as_ref()) && remove(&path)? {
                removed += 1;
                self.stats.record_removals(1);
            }
        }

        Ok(removed)
    }
}

/// Removes one file; an already-missing file counts as not removed.
fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CacheError::io(path, e)),
    }
}

//! Store Module
//!
//! The settings store that ties the components together.
//!
//! ## Responsibilities
//! - Typed get/set on top of the text-only ordered map
//! - Load: line reader → parser → ordered map
//! - Save: ordered map → serializer → output stream
//! - Enforce the optional key/value length limits

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::alloc::{BufferAllocator, SystemAllocator};
use crate::config::Config;
use crate::error::{ConfError, Result};
use crate::format::numeric::{format_float, format_int, parse_float_prefix, parse_int_prefix};
use crate::format::{parse_line, write_entries};
use crate::map::{Entry, OrderedMap};
use crate::reader::LineReader;

/// Counters reported by a successful load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read from the stream, including skipped ones
    pub lines_read: u64,

    /// Lines that were applied to the store
    pub entries_applied: u64,

    /// Lines with no `=`, invalid UTF-8 or over-limit text
    pub lines_skipped: u64,
}

/// An ordered, in-memory settings store
///
/// ## Ownership
/// The store owns every key and value. String getters hand out borrows
/// that end before the next mutation, which the borrow checker enforces.
///
/// ## Concurrency
/// None. A `Store` is `Send` and may be moved between threads, but sharing
/// one needs external locking (see [`SharedStore`](crate::SharedStore)).
pub struct Store {
    config: Config,
    map: OrderedMap,
    alloc: Arc<dyn BufferAllocator>,
}

impl Store {
    /// Create an empty store with the default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty store with the given config
    pub fn with_config(config: Config) -> Self {
        Self::with_allocator(config, Arc::new(SystemAllocator))
    }

    /// Create an empty store that requests every buffer through `alloc`
    pub fn with_allocator(config: Config, alloc: Arc<dyn BufferAllocator>) -> Self {
        Self {
            config,
            map: OrderedMap::new(Arc::clone(&alloc)),
            alloc,
        }
    }

    /// Release every entry and the store itself
    pub fn destroy(self) {
        tracing::debug!(entries = self.map.len(), "destroying store");
    }

    // =========================================================================
    // Load / Save
    // =========================================================================

    /// Merge the settings file at `path` into the store
    ///
    /// Fails without touching the store if the file cannot be opened.
    /// Existing keys keep their position and take the file's value; new
    /// keys are appended in file order.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadStats> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "cannot open settings file");
            e
        })?;

        let stats = self.load_from(file)?;
        tracing::debug!(
            path = %path.display(),
            applied = stats.entries_applied,
            skipped = stats.lines_skipped,
            "loaded settings"
        );
        Ok(stats)
    }

    /// Merge settings read from `reader` into the store
    ///
    /// Unparseable lines are skipped. A read error or allocation failure
    /// stops the load; lines applied before it stay in the store.
    pub fn load_from<R: Read>(&mut self, reader: R) -> Result<LoadStats> {
        let mut lines = LineReader::new(reader, self.config.chunk_size, Arc::clone(&self.alloc))?;
        let mut stats = LoadStats::default();

        while let Some(line) = lines.next_line()? {
            stats.lines_read += 1;

            let Ok(text) = std::str::from_utf8(&line) else {
                tracing::warn!(line = stats.lines_read, "skipping line that is not valid UTF-8");
                stats.lines_skipped += 1;
                continue;
            };

            let Some((key, value)) = parse_line(text) else {
                tracing::trace!(line = stats.lines_read, "skipping line without delimiter");
                stats.lines_skipped += 1;
                continue;
            };

            match self.set_string(key, value) {
                Ok(()) => stats.entries_applied += 1,
                Err(e @ (ConfError::KeyTooLong { .. } | ConfError::ValueTooLong { .. })) => {
                    tracing::warn!(line = stats.lines_read, error = %e, "skipping oversized entry");
                    stats.lines_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(stats)
    }

    /// Write the store to `path`, replacing any existing content
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| {
                tracing::debug!(path = %path.display(), error = %e, "cannot open settings file for writing");
                e
            })?;

        self.save_to(BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), entries = self.map.len(), "saved settings");
        Ok(())
    }

    /// Write every entry to `writer` as `key = value` lines
    pub fn save_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write_entries(&mut writer, self.map.iter())?;
        writer.flush()?;
        Ok(())
    }

    // =========================================================================
    // Typed Getters
    // =========================================================================

    /// Value of `key`, or `default` if the key is absent
    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.map.get(key).unwrap_or(default)
    }

    /// Value of `key` as an integer, or `default` if the key is absent
    ///
    /// Uses the leading numeric prefix of the stored text. A present key
    /// whose text has no such prefix yields `0`, not `default`; use
    /// [`try_get_int`](Self::try_get_int) to tell the two apart.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.map.get(key) {
            Some(text) => parse_int_prefix(text).unwrap_or(0),
            None => default,
        }
    }

    /// Value of `key` as a float, or `default` if the key is absent
    ///
    /// Same contract as [`get_int`](Self::get_int): non-numeric text yields `0.0`.
    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.map.get(key) {
            Some(text) => parse_float_prefix(text).unwrap_or(0.0),
            None => default,
        }
    }

    /// Strict integer lookup: `Ok(None)` if absent, an error if not numeric
    pub fn try_get_int(&self, key: &str) -> Result<Option<i64>> {
        match self.map.get(key) {
            Some(text) => parse_int_prefix(text)
                .map(Some)
                .ok_or_else(|| ConfError::InvalidNumber(text.to_string())),
            None => Ok(None),
        }
    }

    /// Strict float lookup: `Ok(None)` if absent, an error if not numeric
    pub fn try_get_float(&self, key: &str) -> Result<Option<f64>> {
        match self.map.get(key) {
            Some(text) => parse_float_prefix(text)
                .map(Some)
                .ok_or_else(|| ConfError::InvalidNumber(text.to_string())),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Typed Setters
    // =========================================================================

    /// Insert or replace `key`
    pub fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_limits(key, value)?;
        self.map.set(key, value)
    }

    /// Insert or replace `key` with a decimal integer
    pub fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.set_string(key, &format_int(value))
    }

    /// Insert or replace `key` with a decimal float
    ///
    /// Precision follows [`Config::float_precision`].
    pub fn set_float(&mut self, key: &str, value: f64) -> Result<()> {
        let text = format_float(value, self.config.float_precision);
        self.set_string(key, &text)
    }

    /// Remove `key`, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.map.remove(key)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.map.clear();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|e| (e.key(), e.value()))
    }

    /// Look up the full entry for `key`
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.map.find(key)
    }

    /// The underlying ordered map
    pub fn map(&self) -> &OrderedMap {
        &self.map
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_limits(&self, key: &str, value: &str) -> Result<()> {
        if let Some(max) = self.config.max_key_len {
            if key.len() > max {
                return Err(ConfError::KeyTooLong { len: key.len(), max });
            }
        }
        if let Some(max) = self.config.max_value_len {
            if value.len() > max {
                return Err(ConfError::ValueTooLong { len: value.len(), max });
            }
        }
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .field("entries", &self.map)
            .finish()
    }
}

//! ATTRMAP - Concurrent Int→String Map
//! Thread-safe map from `i64` keys to `String` values using Arc + RwLock.
//!
//! ## Concurrency Model
//! - **Read operations** (`get`, `keys`, `len`, etc.) acquire a **read lock** (shared)
//! - **Write operations** (`insert`, `remove`, etc.) acquire a **write lock** (exclusive)
//! - Multiple concurrent readers allowed, writers block all
//! - Batch operations and check-and-insert run as one critical section,
//!   so no other caller can interleave mid-batch
//!
//! ## Read Contract
//! Reads never fail. An absent key reads as the empty string, and the typed
//! getters coerce through [`crate::convert`]'s lenient layer, so invalid
//! input reads as the target type's zero value.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::convert;
use crate::types::{Key, Value};

use super::metrics::MapMetrics;

struct Shared {
    /// The table itself. One lock guards every operation.
    table: RwLock<HashMap<Key, Value>>,
    /// Lock-free operation counters, recorded outside the lock.
    metrics: MapMetrics,
}

/// Thread-safe map from integer keys to string values.
///
/// Cloning the handle is cheap and shares the underlying table; use
/// [`IntStringMap::snapshot`] for an independent deep copy.
///
/// ## Example
/// ```
/// use attrmap::IntStringMap;
/// use std::thread;
///
/// let map = IntStringMap::new();
///
/// // Clone for multiple threads
/// let map_clone = map.clone();
///
/// // Thread 1: Write
/// let writer = thread::spawn(move || {
///     map_clone.insert(1, "10");
/// });
/// writer.join().unwrap();
///
/// // Thread 2 (here: main): typed read
/// assert_eq!(map.get_i64(1), 10);
/// ```
#[derive(Clone)]
pub struct IntStringMap {
    inner: Arc<Shared>,
}

impl IntStringMap {
    /// Create a new, empty map.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new, empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Shared {
                table: RwLock::new(HashMap::with_capacity(capacity)),
                metrics: MapMetrics::new(),
            }),
        }
    }

    // =========================================================================
    // Write path
    // =========================================================================

    /// Insert or overwrite the entry for `key` (write lock).
    pub fn insert(&self, key: Key, value: impl Into<Value>) {
        self.inner.table.write().insert(key, value.into());
        self.inner.metrics.record_insert();
    }

    /// Apply every pair from `entries` under one write lock (write lock).
    /// No concurrent reader or writer can observe a partial batch.
    pub fn extend<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (Key, Value)>,
    {
        let mut applied = 0u64;
        {
            let mut table = self.inner.table.write();
            for (key, value) in entries {
                table.insert(key, value);
                applied += 1;
            }
        }
        self.inner.metrics.record_batch(applied);
        log::trace!("batch insert applied {} entries", applied);
    }

    /// Delete the entry for `key` if present; no-op otherwise (write lock).
    pub fn remove(&self, key: Key) {
        self.inner.table.write().remove(&key);
        self.inner.metrics.record_remove();
    }

    /// Remove every key in `keys` under one write lock (write lock).
    pub fn remove_many(&self, keys: &[Key]) {
        {
            let mut table = self.inner.table.write();
            for key in keys {
                table.remove(key);
            }
        }
        self.inner.metrics.record_batch_remove(keys.len() as u64);
        log::trace!("batch remove applied {} keys", keys.len());
    }

    /// Return the prior value for `key` and remove the entry, atomically
    /// (write lock). Reads as the empty string when the key is absent, the
    /// same ambiguity [`IntStringMap::get`] has.
    pub fn get_and_remove(&self, key: Key) -> Value {
        let prior = self.inner.table.write().remove(&key).unwrap_or_default();
        self.inner.metrics.record_remove();
        prior
    }

    /// Return the value for `key`, inserting `default` first when the key is
    /// absent (write lock). Check and insert are one critical section: two
    /// concurrent callers racing on an absent key produce exactly one
    /// insertion, and both observe the committed value.
    pub fn get_or_insert(&self, key: Key, default: impl Into<Value>) -> Value {
        self.inner
            .table
            .write()
            .entry(key)
            .or_insert_with(|| default.into())
            .clone()
    }

    /// Discard all entries, replacing the table with a fresh one in a single
    /// critical section (write lock).
    pub fn clear(&self) {
        let mut table = self.inner.table.write();
        *table = HashMap::new();
        drop(table);
        self.inner.metrics.record_clear();
        log::debug!("map cleared");
    }

    /// Run `f` with exclusive access to the underlying table (write lock).
    /// The lock is held for the whole call, allowing composite
    /// read-modify-write sequences that `insert`/`get` alone cannot express
    /// atomically. `f` must not call back into this map: re-entrant calls
    /// deadlock on the reader/writer lock.
    pub fn with_exclusive<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<Key, Value>) -> R,
    {
        let mut table = self.inner.table.write();
        f(&mut table)
    }

    // =========================================================================
    // Read path
    // =========================================================================

    /// Get the value for `key`, or the empty string when absent (read lock).
    /// Note the empty string is also a legal stored value; use
    /// [`IntStringMap::contains`] to distinguish.
    pub fn get(&self, key: Key) -> Value {
        let table = self.inner.table.read();
        let value = table.get(&key).cloned();
        drop(table);
        self.inner.metrics.record_get(value.is_some());
        value.unwrap_or_default()
    }

    /// Check whether `key` is present at the instant of the call (read lock).
    pub fn contains(&self, key: Key) -> bool {
        self.inner.table.read().contains_key(&key)
    }

    /// Number of entries (read lock).
    pub fn len(&self) -> usize {
        self.inner.table.read().len()
    }

    /// Check if the map is empty (read lock).
    pub fn is_empty(&self) -> bool {
        self.inner.table.read().is_empty()
    }

    /// Snapshot of all current keys, in unspecified order (read lock).
    /// The returned vector is a copy; later mutation does not affect it.
    pub fn keys(&self) -> Vec<Key> {
        self.inner.table.read().keys().copied().collect()
    }

    /// Snapshot of all current values, in unspecified order (read lock).
    pub fn values(&self) -> Vec<Value> {
        self.inner.table.read().values().cloned().collect()
    }

    /// Deep copy of the current table (read lock). The result shares no
    /// state with this map.
    pub fn snapshot(&self) -> HashMap<Key, Value> {
        self.inner.table.read().clone()
    }

    /// Run `f` with shared access to the underlying table (read lock).
    /// `f` only sees an immutable reference, so it cannot mutate the table.
    /// The same re-entrancy caveat as [`IntStringMap::with_exclusive`]
    /// applies.
    pub fn with_shared<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HashMap<Key, Value>) -> R,
    {
        let table = self.inner.table.read();
        f(&table)
    }

    /// Visit every entry exactly once, stopping early when `f` returns
    /// false (read lock). The lock is held for the whole traversal, so
    /// writers block until iteration completes. Traversal order is
    /// unspecified.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(Key, &str) -> bool,
    {
        let table = self.inner.table.read();
        for (key, value) in table.iter() {
            if !f(*key, value) {
                break;
            }
        }
    }

    /// Operation counters for this map.
    pub fn metrics(&self) -> &MapMetrics {
        &self.inner.metrics
    }

    // =========================================================================
    // Typed reads (lenient coercion, zero value on bad input)
    // =========================================================================

    /// Read as bool: true iff the value is a truthy token
    /// ([`convert::TRUTHY_TOKENS`]).
    pub fn get_bool(&self, key: Key) -> bool {
        convert::to_bool(&self.get(key))
    }

    /// Read as `i8`, or 0 on absent/invalid/out-of-range.
    pub fn get_i8(&self, key: Key) -> i8 {
        convert::to_i8(&self.get(key))
    }

    /// Read as `i16`, or 0 on absent/invalid/out-of-range.
    pub fn get_i16(&self, key: Key) -> i16 {
        convert::to_i16(&self.get(key))
    }

    /// Read as `i32`, or 0 on absent/invalid/out-of-range.
    pub fn get_i32(&self, key: Key) -> i32 {
        convert::to_i32(&self.get(key))
    }

    /// Read as `i64`, or 0 on absent/invalid.
    pub fn get_i64(&self, key: Key) -> i64 {
        convert::to_i64(&self.get(key))
    }

    /// Read as `u8`, or 0 on absent/invalid/out-of-range.
    pub fn get_u8(&self, key: Key) -> u8 {
        convert::to_u8(&self.get(key))
    }

    /// Read as `u16`, or 0 on absent/invalid/out-of-range.
    pub fn get_u16(&self, key: Key) -> u16 {
        convert::to_u16(&self.get(key))
    }

    /// Read as `u32`, or 0 on absent/invalid/out-of-range.
    pub fn get_u32(&self, key: Key) -> u32 {
        convert::to_u32(&self.get(key))
    }

    /// Read as `u64`, or 0 on absent/invalid/negative.
    pub fn get_u64(&self, key: Key) -> u64 {
        convert::to_u64(&self.get(key))
    }

    /// Read as `f32`, or 0.0 on absent/invalid.
    pub fn get_f32(&self, key: Key) -> f32 {
        convert::to_f32(&self.get(key))
    }

    /// Read as `f64`, or 0.0 on absent/invalid.
    pub fn get_f64(&self, key: Key) -> f64 {
        convert::to_f64(&self.get(key))
    }

    /// Read as string. Alias of [`IntStringMap::get`], kept so the typed
    /// getter set is complete.
    pub fn get_string(&self, key: Key) -> Value {
        self.get(key)
    }

    /// Read as a UTC timestamp, with an optional chrono format string.
    /// Unparseable or absent values read as the Unix epoch.
    pub fn get_time(&self, key: Key, format: Option<&str>) -> DateTime<Utc> {
        convert::to_time(&self.get(key), format)
    }

    /// Read as a duration (humantime syntax, or bare-integer nanoseconds).
    /// Unparseable or absent values read as `Duration::ZERO`.
    pub fn get_duration(&self, key: Key) -> Duration {
        convert::to_duration(&self.get(key))
    }
}

impl Default for IntStringMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IntStringMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.inner.table.read();
        f.debug_struct("IntStringMap")
            .field("len", &table.len())
            .finish()
    }
}

//! ATTRMAP - Map Metrics & Observability
//! Provides atomic counters for tracking map operations
//! in a lock-free, thread-safe manner using `AtomicU64`.
//!
//! Counters are recorded outside the map's reader/writer lock, so
//! observability never extends a critical section.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Atomic operation counters for an [`crate::IntStringMap`].
///
/// All counters use `Ordering::Relaxed` since we only need
/// eventual consistency for observability — not synchronization.
#[derive(Debug)]
pub struct MapMetrics {
    /// Total number of single-key insertions.
    pub inserts: AtomicU64,
    /// Total number of read operations (`get` and typed getters).
    pub gets: AtomicU64,
    /// Reads that found a value for the requested key.
    pub hits: AtomicU64,
    /// Total number of removals (single-key and take-style).
    pub removes: AtomicU64,
    /// Total number of batch operations (`extend`, `remove_many`).
    pub batches: AtomicU64,
    /// Total number of `clear` calls.
    pub clears: AtomicU64,
    /// Timestamp when the map was created.
    created: Instant,
}

impl MapMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            gets: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            removes: AtomicU64::new(0),
            batches: AtomicU64::new(0),
            clears: AtomicU64::new(0),
            created: Instant::now(),
        }
    }

    /// Record a single insertion.
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read, noting whether the key was present.
    pub fn record_get(&self, hit: bool) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a removal.
    pub fn record_remove(&self) {
        self.removes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a batch operation touching `n` keys.
    pub fn record_batch(&self, n: u64) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.inserts.fetch_add(n, Ordering::Relaxed);
    }

    /// Record a batch removal touching `n` keys.
    pub fn record_batch_remove(&self, n: u64) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.removes.fetch_add(n, Ordering::Relaxed);
    }

    /// Record a clear.
    pub fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Map uptime in seconds.
    pub fn uptime_secs(&self) -> f64 {
        self.created.elapsed().as_secs_f64()
    }

    /// Total number of recorded operations.
    pub fn total_ops(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
            + self.gets.load(Ordering::Relaxed)
            + self.removes.load(Ordering::Relaxed)
            + self.clears.load(Ordering::Relaxed)
    }

    /// Read hit rate in [0, 1]; 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        let gets = self.gets.load(Ordering::Relaxed);
        if gets == 0 {
            return 0.0;
        }
        self.hits.load(Ordering::Relaxed) as f64 / gets as f64
    }

    /// Format metrics as a human-readable report.
    pub fn report(&self) -> String {
        format!(
            "\n═══ ATTRMAP Metrics ═══\n\
             Operations:\n\
               inserts:  {}\n\
               gets:     {}\n\
               hits:     {}\n\
               removes:  {}\n\
               batches:  {}\n\
               clears:   {}\n\
             Totals:\n\
               total ops: {}\n\
               hit rate:  {:.2}%\n\
             Uptime: {:.2}s",
            self.inserts.load(Ordering::Relaxed),
            self.gets.load(Ordering::Relaxed),
            self.hits.load(Ordering::Relaxed),
            self.removes.load(Ordering::Relaxed),
            self.batches.load(Ordering::Relaxed),
            self.clears.load(Ordering::Relaxed),
            self.total_ops(),
            self.hit_rate() * 100.0,
            self.uptime_secs(),
        )
    }
}

impl Default for MapMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operations() {
        let m = MapMetrics::new();

        m.record_insert();
        m.record_insert();
        m.record_get(true);
        m.record_get(false);
        m.record_remove();
        m.record_batch(3);
        m.record_clear();

        assert_eq!(m.inserts.load(Ordering::Relaxed), 5);
        assert_eq!(m.gets.load(Ordering::Relaxed), 2);
        assert_eq!(m.hits.load(Ordering::Relaxed), 1);
        assert_eq!(m.removes.load(Ordering::Relaxed), 1);
        assert_eq!(m.batches.load(Ordering::Relaxed), 1);
        assert_eq!(m.clears.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_hit_rate() {
        let m = MapMetrics::new();
        assert_eq!(m.hit_rate(), 0.0);
        m.record_get(true);
        m.record_get(false);
        assert_eq!(m.hit_rate(), 0.5);
    }

    #[test]
    fn test_report_format() {
        let m = MapMetrics::new();
        m.record_insert();
        let report = m.report();
        assert!(report.contains("inserts:"));
        assert!(report.contains("hit rate:"));
    }

    #[test]
    fn test_default() {
        let m = MapMetrics::default();
        assert_eq!(m.total_ops(), 0);
    }
}

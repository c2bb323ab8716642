//! Cache statistics tracking

use serde::Serialize;

use crate::policy::WritePolicy;

/// Counters accumulated by one engine over a simulation run
///
/// Every counter only grows until [`CacheStats::reset`] and saturates at
/// `u64::MAX` instead of wrapping. The engine owns its stats exclusively, so
/// plain integers are enough.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    reads: u64,
    writes: u64,
    hits: u64,
    misses: u64,
    hdd_writes: u64,
    evictions: u64,
    dirty_evictions: u64,
    total_time: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a read request
    pub fn record_read(&mut self) {
        self.reads = self.reads.saturating_add(1);
    }

    /// Record a write request
    pub fn record_write(&mut self) {
        self.writes = self.writes.saturating_add(1);
    }

    /// Record a cache hit
    pub fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    /// Record a cache miss
    pub fn record_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    /// Record a write that reached the backing store
    pub fn record_hdd_write(&mut self) {
        self.hdd_writes = self.hdd_writes.saturating_add(1);
    }

    /// Record an eviction
    pub fn record_eviction(&mut self, dirty: bool) {
        self.evictions = self.evictions.saturating_add(1);
        if dirty {
            self.dirty_evictions = self.dirty_evictions.saturating_add(1);
        }
    }

    /// Advance the simulated clock
    pub fn add_time(&mut self, units: u64) {
        self.total_time = self.total_time.saturating_add(units);
    }

    /// Get total reads
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Get total writes
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Get total hits
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Get total misses
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Get total backing store writes
    pub fn hdd_writes(&self) -> u64 {
        self.hdd_writes
    }

    /// Get total evictions
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Get evictions that had to flush a dirty line
    pub fn dirty_evictions(&self) -> u64 {
        self.dirty_evictions
    }

    /// Get simulated time in time units
    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    /// Reads plus writes
    pub fn total_ops(&self) -> u64 {
        self.reads.saturating_add(self.writes)
    }

    /// Calculate hit ratio as a percentage (0.0 to 100.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total_ops();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    /// Freeze the counters into a report for the given policy
    pub fn report(&self, policy: WritePolicy) -> Report {
        Report {
            policy,
            total_ops: self.total_ops(),
            reads: self.reads,
            writes: self.writes,
            hits: self.hits,
            misses: self.misses,
            hit_ratio: self.hit_ratio(),
            hdd_writes: self.hdd_writes,
            total_time: self.total_time,
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Immutable end-of-run snapshot of one engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Write policy the engine ran with
    pub policy: WritePolicy,
    /// Reads plus writes
    pub total_ops: u64,
    /// Read requests
    pub reads: u64,
    /// Write requests
    pub writes: u64,
    /// Requests served by a resident line
    pub hits: u64,
    /// Requests that had to allocate a line
    pub misses: u64,
    /// Hits as a percentage of all requests
    pub hit_ratio: f64,
    /// Writes that reached the backing store
    pub hdd_writes: u64,
    /// Simulated time in time units
    pub total_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let mut stats = CacheStats::new();

        stats.record_read();
        stats.record_read();
        stats.record_write();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.total_ops(), 3);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0 * 100.0);
    }

    #[test]
    fn test_stats_empty_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);
        assert_eq!(stats.report(WritePolicy::WriteBack).hit_ratio, 0.0);
    }

    #[test]
    fn test_stats_evictions() {
        let mut stats = CacheStats::new();

        stats.record_eviction(false);
        stats.record_eviction(true);

        assert_eq!(stats.evictions(), 2);
        assert_eq!(stats.dirty_evictions(), 1);
    }

    #[test]
    fn test_stats_report() {
        let mut stats = CacheStats::new();
        stats.record_write();
        stats.record_miss();
        stats.record_hdd_write();
        stats.add_time(151);

        let report = stats.report(WritePolicy::WriteThrough);
        assert_eq!(report.policy, WritePolicy::WriteThrough);
        assert_eq!(report.total_ops, 1);
        assert_eq!(report.writes, 1);
        assert_eq!(report.hdd_writes, 1);
        assert_eq!(report.total_time, 151);
    }

    #[test]
    fn test_report_json_shape() {
        let report = CacheStats::new().report(WritePolicy::WriteThrough);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["policy"], "write_through");
        for key in [
            "total_ops",
            "reads",
            "writes",
            "hits",
            "misses",
            "hit_ratio",
            "hdd_writes",
            "total_time",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_stats_clock_saturates() {
        let mut stats = CacheStats::new();

        stats.add_time(u64::MAX / 2);
        stats.add_time(u64::MAX / 2);
        stats.add_time(u64::MAX / 2);
        assert_eq!(stats.total_time(), u64::MAX);

        stats.add_time(1);
        assert_eq!(stats.total_time(), u64::MAX);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.add_time(10);
        stats.reset();

        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_ratio(), 0.0);
    }
}

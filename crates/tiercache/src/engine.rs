//! CacheEngine: LRU fast tier in front of a simulated backing store

use tierstore::{placeholder, Address, BackingStore, Result};
use tracing::{debug, trace};

use crate::config::{SimConfig, TimingModel};
use crate::line::CacheLine;
use crate::lru::LruCache;
use crate::policy::WritePolicy;
use crate::request::{Op, Request};
use crate::stats::{CacheStats, Report};

/// Two-tier storage simulator for one write policy
///
/// Requests never fail; each one only moves lines between tiers and charges
/// the configured costs to a simulated clock.
pub struct CacheEngine {
    /// Fixed at construction
    policy: WritePolicy,

    /// Per-operation costs
    timing: TimingModel,

    /// Resident lines, front = least recently used
    lines: LruCache<Address, CacheLine>,

    /// Slow tier, owned by this engine alone
    store: BackingStore,

    /// Run statistics
    stats: CacheStats,
}

impl CacheEngine {
    /// Create an engine with the default timing model
    ///
    /// # Arguments
    /// * `policy` - Write policy for the whole run
    /// * `capacity` - Maximum number of resident lines
    ///
    /// # Returns
    /// * `Result<CacheEngine>` - Fails if `capacity` is zero
    pub fn new(policy: WritePolicy, capacity: usize) -> Result<Self> {
        Self::with_config(
            policy,
            &SimConfig {
                capacity,
                ..SimConfig::default()
            },
        )
    }

    /// Create an engine from a full configuration
    ///
    /// # Returns
    /// * `Result<CacheEngine>` - Fails on zero capacity or a zero cost
    pub fn with_config(policy: WritePolicy, config: &SimConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            policy,
            timing: config.timing,
            lines: LruCache::new(config.capacity),
            store: BackingStore::new(),
            stats: CacheStats::new(),
        })
    }

    /// Read a block
    ///
    /// A miss fetches the block from the backing store (materializing its
    /// placeholder if it was never written) and allocates a clean line.
    pub fn read(&mut self, address: Address) {
        self.stats.record_read();

        if self.lines.get(&address).is_some() {
            self.stats.record_hit();
            self.stats.add_time(self.timing.fast_read);
            return;
        }

        self.stats.record_miss();
        self.stats.add_time(self.timing.slow_read);
        let data = self.store.materialize(address);

        self.allocate(address, CacheLine::clean(data));
        self.stats.add_time(self.timing.fast_write);
    }

    /// Write a block under the engine's policy
    pub fn write(&mut self, address: Address, data: Vec<u8>) {
        self.stats.record_write();

        match self.policy {
            WritePolicy::WriteThrough => self.write_through(address, data),
            WritePolicy::WriteBack => self.write_back(address, data),
        }
    }

    /// Dispatch one request, synthesizing a payload for writes without one
    pub fn access(&mut self, op: Op, address: Address, data: Option<Vec<u8>>) {
        match op {
            Op::Read => self.read(address),
            Op::Write => {
                let data = data.unwrap_or_else(|| placeholder(address));
                self.write(address, data);
            }
        }
    }

    /// Process a request stream in order
    pub fn replay<'a, I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = &'a Request>,
    {
        for request in requests {
            self.access(request.op, request.address, request.data.clone());
        }
    }

    /// Write every dirty line to the backing store, LRU first
    ///
    /// Lines stay resident and keep their recency. Returns the number of
    /// lines flushed.
    pub fn flush(&mut self) -> usize {
        let mut pending = Vec::new();
        self.lines.for_each_mut(|address, line| {
            if line.dirty {
                line.dirty = false;
                if let Some(data) = &line.data {
                    pending.push((*address, data.clone()));
                }
            }
        });

        let flushed = pending.len();
        for (address, data) in pending {
            self.write_to_store(address, data);
        }

        debug!(policy = %self.policy, flushed, "flushed dirty lines");
        flushed
    }

    /// Snapshot the statistics
    pub fn report(&self) -> Report {
        self.stats.report(self.policy)
    }

    /// Drop all lines, the backing store and the statistics
    pub fn reset(&mut self) {
        self.lines.clear();
        self.store.clear();
        self.stats.reset();
    }

    /// Get the write policy
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.lines.capacity()
    }

    /// Get the timing model
    pub fn timing(&self) -> &TimingModel {
        &self.timing
    }

    /// Get the number of resident lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no line is resident
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check whether an address is resident
    pub fn contains(&self, address: Address) -> bool {
        self.lines.contains(&address)
    }

    /// Look at a resident line without touching recency
    pub fn line(&self, address: Address) -> Option<&CacheLine> {
        self.lines.peek(&address)
    }

    /// Resident addresses from least to most recently used
    pub fn resident(&self) -> Vec<Address> {
        self.lines.keys().copied().collect()
    }

    /// Get the backing store
    pub fn backing_store(&self) -> &BackingStore {
        &self.store
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn write_through(&mut self, address: Address, data: Vec<u8>) {
        self.resolve_write_target(address);

        if let Some(line) = self.lines.peek_mut(&address) {
            line.data = Some(data.clone());
        }
        self.stats.add_time(self.timing.fast_write);

        self.write_to_store(address, data);
    }

    fn write_back(&mut self, address: Address, data: Vec<u8>) {
        self.resolve_write_target(address);

        if let Some(line) = self.lines.peek_mut(&address) {
            line.data = Some(data);
            line.dirty = true;
        }
        self.stats.add_time(self.timing.fast_write);
    }

    /// Make `address` resident and most recent for a write
    ///
    /// A miss allocates an empty clean line without reading the backing store.
    fn resolve_write_target(&mut self, address: Address) {
        if self.lines.get(&address).is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
            self.allocate(address, CacheLine::default());
        }
    }

    fn allocate(&mut self, address: Address, line: CacheLine) {
        self.evict_if_needed();
        let displaced = self.lines.insert(address, line);
        debug_assert!(displaced.is_none(), "eviction must run before insert");
    }

    fn evict_if_needed(&mut self) {
        if !self.lines.is_full() {
            return;
        }

        let Some((victim, line)) = self.lines.pop_lru() else {
            return;
        };
        self.stats.record_eviction(line.dirty);
        trace!(policy = %self.policy, victim, dirty = line.dirty, "evicted line");

        if line.dirty {
            if let Some(data) = line.data {
                debug!(policy = %self.policy, victim, "flushing dirty victim");
                self.write_to_store(victim, data);
            }
        }
    }

    fn write_to_store(&mut self, address: Address, data: Vec<u8>) {
        self.store.put(address, data);
        self.stats.add_time(self.timing.slow_write);
        self.stats.record_hdd_write();
    }
}

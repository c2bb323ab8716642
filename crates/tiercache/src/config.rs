//! Simulation configuration
//!
//! Costs are fixed for a whole run and travel with the engine instead of
//! living in globals, so engines compared side by side stay independent.

use serde::{Deserialize, Serialize};
use tierstore::{Error, Result};

/// Default number of resident lines
pub const DEFAULT_CAPACITY: usize = 5;

/// Fixed per-operation costs in simulated time units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingModel {
    /// Reading a resident line
    pub fast_read: u64,
    /// Filling or updating a resident line
    pub fast_write: u64,
    /// Reading a block from the backing store
    pub slow_read: u64,
    /// Writing a block to the backing store
    pub slow_write: u64,
}

impl Default for TimingModel {
    fn default() -> Self {
        Self {
            fast_read: 1,
            fast_write: 1,
            slow_read: 100,
            slow_write: 150,
        }
    }
}

impl TimingModel {
    /// Check that every cost is positive
    pub fn validate(&self) -> Result<()> {
        let costs = [
            ("fast_read", self.fast_read),
            ("fast_write", self.fast_write),
            ("slow_read", self.slow_read),
            ("slow_write", self.slow_write),
        ];
        for (field, cost) in costs {
            if cost == 0 {
                return Err(Error::InvalidTiming(field));
            }
        }
        Ok(())
    }
}

/// Engine construction parameters shared by every policy in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Maximum number of resident lines
    pub capacity: usize,
    /// Per-operation costs
    pub timing: TimingModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            timing: TimingModel::default(),
        }
    }
}

impl SimConfig {
    /// Check capacity and timing
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        self.timing.validate()
    }
}

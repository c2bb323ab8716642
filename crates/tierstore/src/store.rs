//! Backing store implementation
//!
//! The slow tier never evicts: once a block is written or materialized it
//! stays until overwritten or the store is cleared between runs.

use std::collections::HashMap;
use ahash::RandomState;

/// Block identifier shared by both tiers
pub type Address = u64;

/// Deterministic payload for a block that has never been written
pub fn placeholder(address: Address) -> Vec<u8> {
    format!("DATA_{}", address).into_bytes()
}

/// Unbounded address -> payload map modelling the slow tier
#[derive(Debug, Default)]
pub struct BackingStore {
    blocks: HashMap<Address, Vec<u8>, RandomState>,
}

impl BackingStore {
    /// Create an empty backing store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stored payload for an address
    pub fn get(&self, address: Address) -> Option<&[u8]> {
        self.blocks.get(&address).map(Vec::as_slice)
    }

    /// Store a payload, replacing any previous value
    pub fn put(&mut self, address: Address, data: Vec<u8>) {
        self.blocks.insert(address, data);
    }

    /// Fetch the payload for an address, creating its placeholder first if
    /// the block was never written
    pub fn materialize(&mut self, address: Address) -> Vec<u8> {
        self.blocks
            .entry(address)
            .or_insert_with(|| placeholder(address))
            .clone()
    }

    /// Check whether an address has a stored payload
    pub fn contains(&self, address: Address) -> bool {
        self.blocks.contains_key(&address)
    }

    /// Number of stored blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the store holds no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Drop every stored block
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

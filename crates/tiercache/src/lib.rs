//! # tiercache
//!
//! Fast tier of the TierSim two-tier storage model.
//!
//! ## Architecture
//! - **HashMap**: AHash index from address to list node (O(1))
//! - **LRU List**: Doubly-linked list, front = least recently used (O(1))
//! - **Write policies**: write-through and write-back over a
//!   [`tierstore::BackingStore`]
//! - **Cost model**: every tier access adds a fixed [`TimingModel`] cost to
//!   a simulated clock
//!
//! ## Example
//! ```
//! use tiercache::{CacheEngine, WritePolicy};
//!
//! let mut engine = CacheEngine::new(WritePolicy::WriteBack, 2).unwrap();
//! engine.write(1, b"a".to_vec());
//! engine.read(1);
//!
//! let report = engine.report();
//! assert_eq!(report.hits, 1);
//! assert_eq!(report.hdd_writes, 0);
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod line;
mod lru;
mod policy;
mod request;
mod stats;


pub use config::{SimConfig, TimingModel, DEFAULT_CAPACITY};
pub use engine::CacheEngine;
pub use line::CacheLine;
pub use lru::{Keys, LruCache};
pub use policy::WritePolicy;
pub use request::{Op, Request};
pub use stats::{CacheStats, Report};
pub use tierstore::{placeholder, Address, BackingStore, Error, Result};

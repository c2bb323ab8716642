//! # tierstore
//!
//! Slow tier of the TierSim two-tier storage model.
//!
//! ## Model
//! - **BackingStore**: unbounded address -> payload map, never evicts
//! - **Placeholders**: deterministic `DATA_<address>` payloads for blocks
//!   nobody has written yet
//! - **Errors**: shared `Error`/`Result` types for the whole workspace

#![warn(missing_docs)]

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{placeholder, Address, BackingStore};

//! GGS Store - storage adapters
//!
//! In-memory implementations of the core's storage ports, carrying the
//! same invariants a SQL backend would: the (latitude, longitude)
//! uniqueness constraint on geo points, atomic create, and the card
//! status state machine applied inside the adjudication update.

pub mod memory;

pub use memory::{MemoryCardStore, MemoryPointStore};

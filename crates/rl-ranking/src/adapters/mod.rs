//! Adapters module for the rank list
//!
//! Implementations of outbound ports.

pub mod memory;

pub use memory::{InMemoryEventStore, InMemoryPurchaseStore};

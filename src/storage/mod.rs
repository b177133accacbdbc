//! Storage implementations for the bill store

pub mod fixtures;
pub mod in_memory;

pub use in_memory::{InMemoryBillStore, StoreCalls};

//! confreg Persistence - Key-value store adapters
//!
//! This crate provides:
//! - The `KvStore` trait, the only seam through which the registry talks to storage
//! - A Consul-backed implementation speaking the Consul HTTP KV API
//! - An in-memory implementation for single-process use and tests

pub mod consul;
pub mod memory;
pub mod model;
pub mod traits;

// Re-export store trait
pub use traits::KvStore;

// Re-export Consul backend
pub use consul::{ConsulKvStore, ConsulStoreConfig};

// Re-export in-memory backend
pub use memory::MemoryKvStore;

// Re-export model types
pub use model::{KvPair, StoreBackend};

//! Store adapter trait
//!
//! Abstracts a flat, string-keyed byte-value store with prefix listing.
//! Implementations hold no domain state and perform no retries; backend
//! failures surface as `RegistryError::StoreUnavailable`.

use async_trait::async_trait;
use confreg_common::Result;

use crate::model::{KvPair, StoreBackend};

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Which backend this adapter talks to
    fn backend(&self) -> StoreBackend;

    /// Fetch a single key, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<KvPair>>;

    /// Fetch every key starting with `prefix`, sorted by key
    async fn list(&self, prefix: &str) -> Result<Vec<KvPair>>;

    /// Write a key unconditionally
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Write only if the key's modify index still equals `expected_index`.
    ///
    /// An `expected_index` of 0 writes only if the key is absent. Returns
    /// `false` when the check fails.
    async fn compare_and_swap(&self, key: &str, value: Vec<u8>, expected_index: u64)
    -> Result<bool>;

    /// Health check for the storage backend
    async fn health_check(&self) -> Result<()>;
}

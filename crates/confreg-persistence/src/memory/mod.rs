// In-memory key-value store
// Process-local map with a global modify index, suitable for tests and single-node runs

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use confreg_common::Result;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::model::{KvPair, StoreBackend};
use crate::traits::KvStore;

/// Stored value with its revision
#[derive(Debug, Clone)]
struct StoredValue {
    value: Vec<u8>,
    modify_index: u64,
}

/// In-memory key-value store
#[derive(Clone)]
pub struct MemoryKvStore {
    /// Key-value storage: key -> StoredValue
    store: Arc<DashMap<String, StoredValue>>,
    /// Global index counter
    index: Arc<AtomicU64>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            index: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Get the next index
    fn next_index(&self) -> u64 {
        self.index.fetch_add(1, Ordering::SeqCst)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    async fn get(&self, key: &str) -> Result<Option<KvPair>> {
        Ok(self
            .store
            .get(key)
            .map(|entry| KvPair::new(key, entry.value.clone(), entry.modify_index)))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<KvPair>> {
        let mut pairs: Vec<KvPair> = self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| {
                KvPair::new(
                    entry.key().clone(),
                    entry.value().value.clone(),
                    entry.value().modify_index,
                )
            })
            .collect();

        pairs.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(pairs)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let modify_index = self.next_index();
        debug!(key, modify_index, "memory store put");
        self.store.insert(
            key.to_string(),
            StoredValue {
                value,
                modify_index,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let removed = self.store.remove(key).is_some();
        debug!(key, removed, "memory store delete");
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        value: Vec<u8>,
        expected_index: u64,
    ) -> Result<bool> {
        // The entry guard holds the shard lock, so check and write are atomic
        match self.store.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().modify_index != expected_index {
                    return Ok(false);
                }
                let modify_index = self.next_index();
                occupied.insert(StoredValue {
                    value,
                    modify_index,
                });
                Ok(true)
            }
            Entry::Vacant(vacant) => {
                if expected_index != 0 {
                    return Ok(false);
                }
                let modify_index = self.next_index();
                vacant.insert(StoredValue {
                    value,
                    modify_index,
                });
                Ok(true)
            }
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

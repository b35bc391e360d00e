//! Repository layer
//!
//! Both repositories share [`VersionedStore`], which owns the JSON encoding
//! and the key-space bookkeeping for one entity kind. Repositories hold no
//! state beyond the injected store handle and their policies.

pub mod configuration;
pub mod group;
pub mod replace;

pub use configuration::ConfigurationRepository;
pub use group::GroupRepository;
pub use replace::{ReplaceProgress, ReplaceState};

use std::marker::PhantomData;
use std::sync::Arc;

use confreg_common::{EntityKind, RegistryError, Result};
use confreg_persistence::{KvPair, KvStore};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::keyspace;
use crate::model::DeleteConfirmation;
use crate::policy::ConflictPolicy;

/// Attempts at drawing an id with no keys under its prefix
const MAX_ID_ATTEMPTS: usize = 3;

pub(crate) struct VersionedStore<T> {
    store: Arc<dyn KvStore>,
    kind: EntityKind,
    _entity: PhantomData<fn() -> T>,
}

impl<T> VersionedStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(store: Arc<dyn KvStore>, kind: EntityKind) -> Self {
        Self {
            store,
            kind,
            _entity: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    pub(crate) fn kind(&self) -> EntityKind {
        self.kind
    }

    pub(crate) fn key(&self, id: &str, version: &str) -> String {
        keyspace::key_for_version(self.kind, id, version)
    }

    pub(crate) fn encode(&self, key: &str, entity: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| {
            RegistryError::InvalidArgument(format!("cannot encode {} '{}': {}", self.kind, key, e))
        })
    }

    pub(crate) fn decode(&self, key: &str, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| RegistryError::decode(self.kind, key, e))
    }

    /// Draw an id that has no stored versions yet.
    ///
    /// Best effort only: another writer may claim the same id between this
    /// check and the caller's write.
    pub(crate) async fn fresh_id(&self) -> Result<String> {
        let mut last_prefix = String::new();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = keyspace::generate_id();
            let prefix = keyspace::key_prefix_for_id(self.kind, &id);
            if self.store.list(&prefix).await?.is_empty() {
                return Ok(id);
            }
            warn!(kind = %self.kind, id = %id, attempt, "generated id already in use");
            last_prefix = prefix;
        }

        Err(RegistryError::already_exists(self.kind, last_prefix))
    }

    pub(crate) async fn write(
        &self,
        id: &str,
        version: &str,
        entity: &T,
        policy: ConflictPolicy,
    ) -> Result<()> {
        let key = self.key(id, version);
        let bytes = self.encode(&key, entity)?;

        debug!(kind = %self.kind, key = %key, %policy, "writing entity");
        match policy {
            ConflictPolicy::OverwriteOnConflict => self.store.put(&key, bytes).await,
            // Index 0 only writes when the key is absent
            ConflictPolicy::RejectOnConflict => {
                if self.store.compare_and_swap(&key, bytes, 0).await? {
                    Ok(())
                } else {
                    Err(RegistryError::already_exists(self.kind, key))
                }
            }
        }
    }

    pub(crate) async fn get_pair(&self, id: &str, version: &str) -> Result<KvPair> {
        let key = self.key(id, version);
        self.store
            .get(&key)
            .await?
            .ok_or_else(|| RegistryError::not_found(self.kind, key))
    }

    pub(crate) async fn get(&self, id: &str, version: &str) -> Result<T> {
        let pair = self.get_pair(id, version).await?;
        self.decode(&pair.key, &pair.value)
    }

    pub(crate) async fn list_prefix(&self, prefix: &str) -> Result<Vec<T>> {
        self.store
            .list(prefix)
            .await?
            .iter()
            .map(|pair| self.decode(&pair.key, &pair.value))
            .collect()
    }

    pub(crate) async fn list_id(&self, id: &str) -> Result<Vec<T>> {
        self.list_prefix(&keyspace::key_prefix_for_id(self.kind, id))
            .await
    }

    pub(crate) async fn list_all(&self) -> Result<Vec<T>> {
        self.list_prefix(&keyspace::key_prefix_for_kind(self.kind))
            .await
    }

    pub(crate) async fn delete(&self, id: &str, version: &str) -> Result<DeleteConfirmation> {
        let key = self.key(id, version);
        if self.store.get(&key).await?.is_none() {
            return Err(RegistryError::not_found(self.kind, key));
        }

        self.store.delete(&key).await?;
        debug!(kind = %self.kind, key = %key, "deleted entity");

        Ok(DeleteConfirmation {
            deleted: id.to_string(),
        })
    }
}

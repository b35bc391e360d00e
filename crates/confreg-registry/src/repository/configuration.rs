// Configuration repository
// CRUD over single configuration entries keyed by (id, version)

use std::sync::Arc;

use confreg_common::{EntityKind, Result};
use confreg_persistence::KvStore;
use tracing::info;

use super::VersionedStore;
use crate::keyspace;
use crate::model::{Configuration, DeleteConfirmation};
use crate::policy::ConflictPolicy;

/// Configuration repository.
///
/// By default `create` and `add_version` overwrite an existing
/// `(id, version)` without complaint, unlike groups.
pub struct ConfigurationRepository {
    inner: VersionedStore<Configuration>,
    conflict_policy: ConflictPolicy,
}

impl ConfigurationRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            inner: VersionedStore::new(store, EntityKind::Configuration),
            conflict_policy: ConflictPolicy::OverwriteOnConflict,
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    /// Store a new configuration under a freshly assigned id
    pub async fn create(&self, mut config: Configuration) -> Result<Configuration> {
        config.id = self.inner.fresh_id().await?;
        self.inner
            .write(&config.id, &config.version, &config, self.conflict_policy)
            .await?;

        info!(id = %config.id, version = %config.version, "created configuration");
        Ok(config)
    }

    /// Store `config` as a version of `id`, replacing any existing value
    pub async fn add_version(&self, id: &str, mut config: Configuration) -> Result<Configuration> {
        keyspace::validate_id(id)?;
        config.id = id.to_string();
        self.inner
            .write(
                &config.id,
                &config.version,
                &config,
                ConflictPolicy::OverwriteOnConflict,
            )
            .await?;

        info!(id = %config.id, version = %config.version, "added configuration version");
        Ok(config)
    }

    pub async fn get_by_id_and_version(&self, id: &str, version: &str) -> Result<Configuration> {
        self.inner.get(id, version).await
    }

    /// Every stored version of `id`, empty when there are none
    pub async fn get_all_versions_by_id(&self, id: &str) -> Result<Vec<Configuration>> {
        self.inner.list_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Configuration>> {
        self.inner.list_all().await
    }

    pub async fn delete(&self, id: &str, version: &str) -> Result<DeleteConfirmation> {
        let confirmation = self.inner.delete(id, version).await?;
        info!(id, version, "deleted configuration");
        Ok(confirmation)
    }
}

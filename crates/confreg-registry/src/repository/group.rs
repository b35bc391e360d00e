// Group repository
// CRUD over groups keyed by (id, version), in-place replace, and label queries

use std::sync::Arc;

use confreg_common::{EntityKind, RegistryError, Result};
use confreg_persistence::KvStore;
use tracing::info;

use super::VersionedStore;
use super::replace::{ReplaceProgress, ReplaceState};
use crate::keyspace;
use crate::matcher::LabelMatcher;
use crate::model::{ConfigurationInGroup, DeleteConfirmation, Group};
use crate::policy::{ConflictPolicy, ReplaceStrategy};

/// Group repository.
///
/// By default `create` refuses to overwrite an existing `(id, version)`
/// while `add_version` writes unconditionally.
pub struct GroupRepository {
    inner: VersionedStore<Group>,
    conflict_policy: ConflictPolicy,
    replace_strategy: ReplaceStrategy,
}

impl GroupRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            inner: VersionedStore::new(store, EntityKind::Group),
            conflict_policy: ConflictPolicy::RejectOnConflict,
            replace_strategy: ReplaceStrategy::DeleteThenWrite,
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_replace_strategy(mut self, strategy: ReplaceStrategy) -> Self {
        self.replace_strategy = strategy;
        self
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    pub fn replace_strategy(&self) -> ReplaceStrategy {
        self.replace_strategy
    }

    /// Store a new group under a freshly assigned id
    pub async fn create(&self, mut group: Group) -> Result<Group> {
        group.id = self.inner.fresh_id().await?;
        self.inner
            .write(&group.id, &group.version, &group, self.conflict_policy)
            .await?;

        info!(id = %group.id, version = %group.version, members = group.configs.len(), "created group");
        Ok(group)
    }

    /// Store `group` at its own `(id, version)`, replacing any existing value
    pub async fn add_version(&self, group: Group) -> Result<Group> {
        keyspace::validate_id(&group.id)?;
        self.inner
            .write(
                &group.id,
                &group.version,
                &group,
                ConflictPolicy::OverwriteOnConflict,
            )
            .await?;

        info!(id = %group.id, version = %group.version, "added group version");
        Ok(group)
    }

    /// Replace an existing `(id, version)` with `group`.
    ///
    /// Fails with `NotFound` when nothing is stored there. With
    /// [`ReplaceStrategy::DeleteThenWrite`] a store failure after the delete
    /// leaves the group absent; see [`super::replace`].
    pub async fn replace(&self, id: &str, version: &str, mut group: Group) -> Result<Group> {
        keyspace::validate_id(id)?;
        group.id = id.to_string();
        group.version = version.to_string();

        match self.replace_strategy {
            ReplaceStrategy::DeleteThenWrite => self.replace_delete_then_write(&group).await?,
            ReplaceStrategy::CompareAndSwap => self.replace_compare_and_swap(&group).await?,
        }

        info!(id, version, strategy = %self.replace_strategy, "replaced group");
        Ok(group)
    }

    async fn replace_delete_then_write(&self, group: &Group) -> Result<()> {
        let store = self.inner.store();
        let key = self.inner.key(&group.id, &group.version);
        // Encode up front so a bad payload never opens the gap
        let bytes = self.inner.encode(&key, group)?;

        if store.get(&key).await?.is_none() {
            return Err(RegistryError::not_found(self.inner.kind(), key));
        }

        let mut progress = ReplaceProgress::new(key.as_str());
        progress.advance(ReplaceState::Deleting);
        if let Err(e) = store.delete(&key).await {
            progress.fail(&e);
            return Err(e);
        }
        progress.advance(ReplaceState::Absent);

        progress.advance(ReplaceState::Writing);
        if let Err(e) = store.put(&key, bytes).await {
            progress.fail(&e);
            return Err(e);
        }
        progress.advance(ReplaceState::Present);

        Ok(())
    }

    async fn replace_compare_and_swap(&self, group: &Group) -> Result<()> {
        let current = self.inner.get_pair(&group.id, &group.version).await?;
        let bytes = self.inner.encode(&current.key, group)?;

        if self
            .inner
            .store()
            .compare_and_swap(&current.key, bytes, current.modify_index)
            .await?
        {
            Ok(())
        } else {
            Err(RegistryError::concurrent_modification(
                self.inner.kind(),
                current.key,
            ))
        }
    }

    pub async fn get_by_id_and_version(&self, id: &str, version: &str) -> Result<Group> {
        self.inner.get(id, version).await
    }

    /// Every stored version of `id`, empty when there are none
    pub async fn get_all_versions_by_id(&self, id: &str) -> Result<Vec<Group>> {
        self.inner.list_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Group>> {
        self.inner.list_all().await
    }

    pub async fn delete(&self, id: &str, version: &str) -> Result<DeleteConfirmation> {
        let confirmation = self.inner.delete(id, version).await?;
        info!(id, version, "deleted group");
        Ok(confirmation)
    }

    /// Members of `(id, version)` whose labels exactly equal `predicate`
    pub async fn find_by_labels(
        &self,
        id: &str,
        version: &str,
        predicate: &str,
    ) -> Result<Vec<ConfigurationInGroup>> {
        let group = self.inner.get(id, version).await?;
        Ok(LabelMatcher::parse(predicate).select(&group))
    }
}

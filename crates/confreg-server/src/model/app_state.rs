//! Application state shared across handlers

use std::sync::Arc;

use confreg_persistence::KvStore;
use confreg_registry::{ConfigurationRepository, GroupRepository};

/// Repositories built once at startup over a single injected store handle
pub struct AppState {
    store: Arc<dyn KvStore>,
    configurations: ConfigurationRepository,
    groups: GroupRepository,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KvStore>,
        configurations: ConfigurationRepository,
        groups: GroupRepository,
    ) -> Self {
        Self {
            store,
            configurations,
            groups,
        }
    }

    /// State with default policies over `store`
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self::new(
            store.clone(),
            ConfigurationRepository::new(store.clone()),
            GroupRepository::new(store),
        )
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    pub fn configurations(&self) -> &ConfigurationRepository {
        &self.configurations
    }

    pub fn groups(&self) -> &GroupRepository {
        &self.groups
    }
}

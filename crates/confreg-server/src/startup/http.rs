//! HTTP server setup and the wiring behind it

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};
use confreg_persistence::{ConsulKvStore, KvStore, MemoryKvStore, StoreBackend};
use confreg_registry::{ConfigurationRepository, GroupRepository};
use tracing::info;

use crate::{api::route::routes, model::AppState, model::Configuration};

/// Build the store handle selected by `store.backend`
pub fn build_store(configuration: &Configuration) -> anyhow::Result<Arc<dyn KvStore>> {
    let store: Arc<dyn KvStore> = match configuration.store_backend()? {
        StoreBackend::Consul => {
            let consul_config = configuration.consul_store_config();
            info!(
                address = %consul_config.address,
                scheme = %consul_config.scheme,
                "Using Consul key-value store"
            );
            Arc::new(ConsulKvStore::new(consul_config)?)
        }
        StoreBackend::Memory => {
            info!("Using in-memory key-value store");
            Arc::new(MemoryKvStore::new())
        }
    };

    Ok(store)
}

/// Build both repositories over one store handle
pub fn build_app_state(
    configuration: &Configuration,
    store: Arc<dyn KvStore>,
) -> anyhow::Result<AppState> {
    let configurations = ConfigurationRepository::new(store.clone())
        .with_conflict_policy(configuration.configuration_conflict_policy()?);
    let groups = GroupRepository::new(store.clone())
        .with_conflict_policy(configuration.group_conflict_policy()?)
        .with_replace_strategy(configuration.group_replace_strategy()?);

    info!(
        configuration_conflict_policy = %configurations.conflict_policy(),
        group_conflict_policy = %groups.conflict_policy(),
        group_replace_strategy = %groups.replace_strategy(),
        "Registry initialized"
    );

    Ok(AppState::new(store, configurations, groups))
}

/// Creates and binds the main HTTP server.
pub fn main_server(
    app_state: Arc<AppState>,
    address: String,
    port: u16,
    shutdown_timeout: Duration,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(app_state.clone()))
            .configure(routes)
    })
    .shutdown_timeout(shutdown_timeout.as_secs())
    .disable_signals()
    .bind((address, port))?
    .run())
}

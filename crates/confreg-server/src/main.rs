//! Main entry point for the confreg server.

use std::sync::Arc;

use confreg_server::{model, startup};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = model::Configuration::new()?;
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let store = startup::build_store(&configuration)?;
    match store.health_check().await {
        Ok(()) => info!(backend = %store.backend(), "Store is reachable"),
        Err(e) => error!(backend = %store.backend(), "Store is not reachable yet: {}", e),
    }

    let app_state = Arc::new(startup::build_app_state(&configuration, store)?);

    let address = configuration.server_address();
    let port = configuration.server_port();
    let shutdown_timeout = configuration.shutdown_timeout();

    info!("Starting confreg server on {}:{}", address, port);
    let server = startup::main_server(app_state, address, port, shutdown_timeout)?;

    let shutdown_signal = startup::listen_for_shutdown_signal();
    tokio::spawn(startup::stop_on_signal(
        server.handle(),
        shutdown_signal,
        shutdown_timeout,
    ));

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("confreg server shutdown complete");
    Ok(())
}

//! Graceful shutdown handling
//!
//! A background task waits for Ctrl+C or SIGTERM and broadcasts a shutdown
//! notification. The HTTP server is then stopped gracefully.

use std::time::Duration;

use actix_web::dev::ServerHandle;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Shutdown signal sender and receiver
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// Trigger shutdown
    pub fn shutdown(&self) {
        let _ = self.sender.send(());
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the OS signal listener and return the signal it triggers
pub fn listen_for_shutdown_signal() -> ShutdownSignal {
    let shutdown = ShutdownSignal::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
        }

        shutdown_clone.shutdown();
    });

    shutdown
}

/// Stop `server` once `signal` fires.
///
/// In-flight requests get `timeout` to finish; actix enforces it through
/// the server's own shutdown timeout.
pub async fn stop_on_signal(server: ServerHandle, signal: ShutdownSignal, timeout: Duration) {
    let mut receiver = signal.subscribe();
    let _ = receiver.recv().await;

    info!(
        "Shutdown initiated, waiting up to {:?} for connections to close...",
        timeout
    );
    server.stop(true).await;
    info!("Shutdown complete");
}

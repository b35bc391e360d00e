//! Application startup utilities module.
//!
//! Store construction, HTTP server binding, logging and graceful shutdown.

mod http;
mod logging;
mod shutdown;

pub use http::{build_app_state, build_store, main_server};
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
pub use shutdown::{ShutdownSignal, listen_for_shutdown_signal, stop_on_signal};

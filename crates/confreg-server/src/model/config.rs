//! Configuration management for confreg server
//!
//! Values are layered, lowest precedence first: `conf/application.yml` (optional),
//! `CONFREG.`-prefixed environment variables, then command line arguments.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use config::{Config, Environment};
use confreg_persistence::{ConsulStoreConfig, StoreBackend};
use confreg_registry::{ConflictPolicy, ReplaceStrategy};

use super::constants::*;
use crate::startup::{LogRotation, LoggingConfig};

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "confreg-server", version, about)]
pub struct Cli {
    #[arg(short = 'a', long = "address")]
    address: Option<String>,
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    /// Store backend: consul or memory
    #[arg(short = 's', long = "store")]
    store: Option<String>,
    /// Consul agent host
    #[arg(long = "db", env = "DB")]
    db_host: Option<String>,
    /// Consul agent port
    #[arg(long = "db-port", env = "DBPORT")]
    db_port: Option<String>,
}

impl Cli {
    /// Agent address from `DB` and `DBPORT`, when either is set
    fn consul_address(&self) -> Option<String> {
        if self.db_host.is_none() && self.db_port.is_none() {
            return None;
        }

        let host = self
            .db_host
            .clone()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_CONSUL_HOST.to_string());
        let port = self
            .db_port
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONSUL_PORT.to_string());
        Some(format!("{}:{}", host, port))
    }
}

/// Application configuration loaded from config files, environment and arguments
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration using the process arguments
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(address) = args.consul_address() {
            config_builder = config_builder.set_override(CONSUL_ADDRESS_PROPERTY, address)?;
        }
        if let Some(v) = args.address {
            config_builder = config_builder.set_override(SERVER_ADDRESS_PROPERTY, v)?;
        }
        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT_PROPERTY, i64::from(v))?;
        }
        if let Some(v) = args.store {
            config_builder = config_builder.set_override(STORE_BACKEND_PROPERTY, v)?;
        }

        let config = config_builder
            .build()
            .map_err(|e| anyhow!("failed to build configuration: {}", e))?;

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT_PROPERTY)
            .ok()
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        let secs = self
            .config
            .get_int(SERVER_SHUTDOWN_TIMEOUT_PROPERTY)
            .ok()
            .and_then(|s| u64::try_from(s).ok())
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    // ========================================================================
    // Store Configuration
    // ========================================================================

    pub fn store_backend(&self) -> anyhow::Result<StoreBackend> {
        match self.config.get_string(STORE_BACKEND_PROPERTY) {
            Ok(v) => StoreBackend::from_str(&v).map_err(|e| anyhow!(e)),
            Err(_) => Ok(StoreBackend::Consul),
        }
    }

    pub fn consul_store_config(&self) -> ConsulStoreConfig {
        let address = self
            .config
            .get_string(CONSUL_ADDRESS_PROPERTY)
            .unwrap_or(format!("{}:{}", DEFAULT_CONSUL_HOST, DEFAULT_CONSUL_PORT));
        let scheme = self
            .config
            .get_string(CONSUL_SCHEME_PROPERTY)
            .unwrap_or(DEFAULT_CONSUL_SCHEME.to_string());
        let connect_timeout_ms = self
            .config
            .get_int(CONSUL_CONNECT_TIMEOUT_PROPERTY)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_CONSUL_CONNECT_TIMEOUT_MS);
        let read_timeout_ms = self
            .config
            .get_int(CONSUL_READ_TIMEOUT_PROPERTY)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_CONSUL_READ_TIMEOUT_MS);

        ConsulStoreConfig::new(&address)
            .with_scheme(&scheme)
            .with_timeouts(connect_timeout_ms, read_timeout_ms)
    }

    // ========================================================================
    // Registry Configuration
    // ========================================================================

    pub fn configuration_conflict_policy(&self) -> anyhow::Result<ConflictPolicy> {
        self.parse_or(
            CONFIGURATION_CONFLICT_POLICY_PROPERTY,
            ConflictPolicy::OverwriteOnConflict,
        )
    }

    pub fn group_conflict_policy(&self) -> anyhow::Result<ConflictPolicy> {
        self.parse_or(
            GROUP_CONFLICT_POLICY_PROPERTY,
            ConflictPolicy::RejectOnConflict,
        )
    }

    pub fn group_replace_strategy(&self) -> anyhow::Result<ReplaceStrategy> {
        self.parse_or(
            GROUP_REPLACE_STRATEGY_PROPERTY,
            ReplaceStrategy::DeleteThenWrite,
        )
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        let level = self
            .config
            .get_string(LOGGING_LEVEL_PROPERTY)
            .unwrap_or(DEFAULT_LOGGING_LEVEL.to_string());
        let log_dir = self
            .config
            .get_string(LOGGING_DIR_PROPERTY)
            .ok()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);
        let rotation = self
            .config
            .get_string(LOGGING_ROTATION_PROPERTY)
            .ok()
            .and_then(|r| r.parse().ok())
            .unwrap_or(LogRotation::Daily);

        LoggingConfig::from_config(log_dir, level, rotation)
    }

    fn parse_or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr<Err = String>,
    {
        match self.config.get_string(key) {
            Ok(v) => v
                .parse()
                .map_err(|e| anyhow!("invalid value for '{}': {}", key, e)),
            Err(_) => Ok(default),
        }
    }
}

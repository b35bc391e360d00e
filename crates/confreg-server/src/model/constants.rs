//! Configuration property names and their defaults

// Server
pub const SERVER_ADDRESS_PROPERTY: &str = "server.address";
pub const SERVER_PORT_PROPERTY: &str = "server.port";
pub const SERVER_SHUTDOWN_TIMEOUT_PROPERTY: &str = "server.shutdown-timeout-secs";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// Store
pub const STORE_BACKEND_PROPERTY: &str = "store.backend";
pub const CONSUL_ADDRESS_PROPERTY: &str = "store.consul.address";
pub const CONSUL_SCHEME_PROPERTY: &str = "store.consul.scheme";
pub const CONSUL_CONNECT_TIMEOUT_PROPERTY: &str = "store.consul.connect-timeout-ms";
pub const CONSUL_READ_TIMEOUT_PROPERTY: &str = "store.consul.read-timeout-ms";

pub const DEFAULT_CONSUL_HOST: &str = "127.0.0.1";
pub const DEFAULT_CONSUL_PORT: u16 = 8500;
pub const DEFAULT_CONSUL_SCHEME: &str = "http";
pub const DEFAULT_CONSUL_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONSUL_READ_TIMEOUT_MS: u64 = 30000;

// Registry
pub const CONFIGURATION_CONFLICT_POLICY_PROPERTY: &str = "registry.configuration.conflict-policy";
pub const GROUP_CONFLICT_POLICY_PROPERTY: &str = "registry.group.conflict-policy";
pub const GROUP_REPLACE_STRATEGY_PROPERTY: &str = "registry.group.replace-strategy";

// Logging
pub const LOGGING_LEVEL_PROPERTY: &str = "logging.level";
pub const LOGGING_DIR_PROPERTY: &str = "logging.dir";
pub const LOGGING_ROTATION_PROPERTY: &str = "logging.rotation";

pub const DEFAULT_LOGGING_LEVEL: &str = "info";

pub const ENV_PREFIX: &str = "confreg";
pub const CONFIG_FILE: &str = "conf/application.yml";

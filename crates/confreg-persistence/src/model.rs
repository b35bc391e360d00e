//! Model types returned by the store adapters
//!
//! These types are decoupled from any specific backend wire format.

use serde::{Deserialize, Serialize};

/// A stored key with its raw value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPair {
    pub key: String,
    pub value: Vec<u8>,
    /// Backend revision of this key, used for check-and-set writes
    pub modify_index: u64,
}

impl KvPair {
    pub fn new(key: impl Into<String>, value: Vec<u8>, modify_index: u64) -> Self {
        Self {
            key: key.into(),
            value,
            modify_index,
        }
    }
}

/// Which backend the store adapter talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    /// Remote Consul agent over its HTTP KV API
    Consul,
    /// Process-local map, lost on restart
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Consul => write!(f, "consul"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "consul" => Ok(StoreBackend::Consul),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_round_trip() {
        assert_eq!("consul".parse::<StoreBackend>(), Ok(StoreBackend::Consul));
        assert_eq!("Memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!("in-memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("etcd".parse::<StoreBackend>().is_err());
        assert_eq!(StoreBackend::Consul.to_string(), "consul");
    }
}

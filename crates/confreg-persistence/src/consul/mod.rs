// Consul key-value store adapter
// Talks to a Consul agent over its HTTP KV API (/v1/kv)

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use confreg_common::{RegistryError, Result};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{KvPair, StoreBackend};
use crate::traits::KvStore;

/// Configuration for the Consul store adapter
#[derive(Clone, Debug)]
pub struct ConsulStoreConfig {
    /// Agent address as `host:port`
    pub address: String,
    /// `http` or `https`
    pub scheme: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for ConsulStoreConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8500".to_string(),
            scheme: "http".to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl ConsulStoreConfig {
    /// Create a new config for a single agent address
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..Default::default()
        }
    }

    /// Set the URL scheme
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

/// Consul KV entry as returned by `GET /v1/kv/{key}`
#[derive(Debug, Deserialize)]
struct ConsulKvEntry {
    #[serde(rename = "Key")]
    key: String,

    #[serde(rename = "ModifyIndex", default)]
    modify_index: u64,

    #[serde(rename = "Value", default)]
    value: Option<String>, // Base64 encoded
}

/// Store adapter backed by a Consul agent
pub struct ConsulKvStore {
    client: Client,
    base_url: Url,
}

impl ConsulKvStore {
    /// Create a new adapter. No request is made until the first operation.
    pub fn new(config: ConsulStoreConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()
            .map_err(unavailable)?;

        let base_url =
            Url::parse(&format!("{}://{}/", config.scheme, config.address)).map_err(|e| {
                RegistryError::InvalidArgument(format!(
                    "invalid consul address '{}': {}",
                    config.address, e
                ))
            })?;

        Ok(Self { client, base_url })
    }

    /// Build `/v1/{section}/...` with each key segment percent-encoded
    fn api_url(&self, section: &[&str], key: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RegistryError::InvalidArgument(format!(
                    "consul address '{}' cannot be a base URL",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().push("v1").extend(section.iter());
            if !key.is_empty() {
                segments.extend(key.split('/'));
            }
        }
        Ok(url)
    }

    fn kv_url(&self, key: &str) -> Result<Url> {
        self.api_url(&["kv"], key)
    }
}

fn unavailable(err: reqwest::Error) -> RegistryError {
    RegistryError::StoreUnavailable(format!("consul request failed: {}", err))
}

fn status_error(status: StatusCode, operation: &str, key: &str) -> RegistryError {
    RegistryError::StoreUnavailable(format!(
        "consul {} '{}' returned {}",
        operation, key, status
    ))
}

/// Decode a Consul KV listing into raw pairs
fn decode_entries(body: &[u8]) -> Result<Vec<KvPair>> {
    let entries: Vec<ConsulKvEntry> = serde_json::from_slice(body).map_err(|e| {
        RegistryError::StoreUnavailable(format!("malformed consul response: {}", e))
    })?;

    entries
        .into_iter()
        .map(|entry| {
            let value = match entry.value {
                Some(encoded) => BASE64.decode(encoded).map_err(|e| {
                    RegistryError::StoreUnavailable(format!(
                        "malformed consul value for '{}': {}",
                        entry.key, e
                    ))
                })?,
                None => Vec::new(),
            };
            Ok(KvPair::new(entry.key, value, entry.modify_index))
        })
        .collect()
}

/// Consul answers writes with a bare JSON boolean
fn decode_bool(body: &[u8]) -> Result<bool> {
    serde_json::from_slice(body).map_err(|e| {
        RegistryError::StoreUnavailable(format!("malformed consul write response: {}", e))
    })
}

#[async_trait]
impl KvStore for ConsulKvStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Consul
    }

    async fn get(&self, key: &str) -> Result<Option<KvPair>> {
        let url = self.kv_url(key)?;
        debug!(key, "consul get");

        let response = self.client.get(url).send().await.map_err(unavailable)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.bytes().await.map_err(unavailable)?;
                let pairs = decode_entries(&body)?;
                Ok(pairs.into_iter().find(|pair| pair.key == key))
            }
            status => Err(status_error(status, "get", key)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<KvPair>> {
        let mut url = self.kv_url(prefix)?;
        url.query_pairs_mut().append_pair("recurse", "true");
        debug!(prefix, "consul list");

        let response = self.client.get(url).send().await.map_err(unavailable)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if status.is_success() => {
                let body = response.bytes().await.map_err(unavailable)?;
                let mut pairs: Vec<KvPair> = decode_entries(&body)?
                    .into_iter()
                    .filter(|pair| pair.key.starts_with(prefix))
                    .collect();
                pairs.sort_by(|a, b| a.key.cmp(&b.key));
                Ok(pairs)
            }
            status => Err(status_error(status, "list", prefix)),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let url = self.kv_url(key)?;
        debug!(key, bytes = value.len(), "consul put");

        let response = self
            .client
            .put(url)
            .body(value)
            .send()
            .await
            .map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, "put", key));
        }

        let body = response.bytes().await.map_err(unavailable)?;
        if decode_bool(&body)? {
            Ok(())
        } else {
            warn!(key, "consul rejected write");
            Err(RegistryError::StoreUnavailable(format!(
                "consul rejected write of '{}'",
                key
            )))
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let url = self.kv_url(key)?;
        debug!(key, "consul delete");

        let response = self.client.delete(url).send().await.map_err(unavailable)?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(status_error(status, "delete", key))
        }
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        value: Vec<u8>,
        expected_index: u64,
    ) -> Result<bool> {
        let mut url = self.kv_url(key)?;
        url.query_pairs_mut()
            .append_pair("cas", &expected_index.to_string());
        debug!(key, expected_index, "consul check-and-set");

        let response = self
            .client
            .put(url)
            .body(value)
            .send()
            .await
            .map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, "cas", key));
        }

        let body = response.bytes().await.map_err(unavailable)?;
        decode_bool(&body)
    }

    async fn health_check(&self) -> Result<()> {
        let url = self.api_url(&["status", "leader"], "")?;

        let response = self.client.get(url).send().await.map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, "status", "leader"));
        }

        let body = response.bytes().await.map_err(unavailable)?;
        let leader: String = serde_json::from_slice(&body).map_err(|e| {
            RegistryError::StoreUnavailable(format!("malformed consul leader response: {}", e))
        })?;
        if leader.is_empty() {
            return Err(RegistryError::StoreUnavailable(
                "consul has no elected leader".to_string(),
            ));
        }
        Ok(())
    }
}

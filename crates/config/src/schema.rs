//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dev node and platform endpoints
    #[serde(default)]
    pub node: NodeConfig,
    /// Signing account
    #[serde(default)]
    pub signer: SignerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// JSON-RPC URL of the hardhat node
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Base URL of the platform reset service
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
    /// Headers sent with every dev-node and platform request
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Signer configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Hex private key, with or without `0x`
    pub private_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_platform_url() -> String {
    "http://127.0.0.1:49160".to_string()
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("content-type".to_string(), "application/json".to_string())])
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            platform_url: default_platform_url(),
            headers: default_headers(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl NodeConfig {
    /// Whether the configured headers ask for JSON bodies
    pub fn sends_json(&self) -> bool {
        self.headers.iter().any(|(k, v)| {
            k.eq_ignore_ascii_case("content-type") && v.to_ascii_lowercase().contains("json")
        })
    }
}

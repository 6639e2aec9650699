//! Platform reset endpoint

use crate::traits::ChainReset;
use crate::transport::{HttpMethod, HttpTransport};
use async_trait::async_trait;
use config::NodeConfig;
use serde_json::json;
use std::time::Duration;
use types::{Result, TransportError, RESET_PATH};

/// Client for the service that re-forks the dev node's backing chain
#[derive(Debug, Clone)]
pub struct PlatformClient {
    platform_url: String,
    transport: HttpTransport,
}

impl PlatformClient {
    /// Create a client for the platform at `platform_url`
    pub fn new(platform_url: impl Into<String>, transport: HttpTransport) -> Self {
        Self {
            platform_url: platform_url.into(),
            transport,
        }
    }

    /// Create a client from node configuration
    pub fn from_config(config: &NodeConfig) -> Result<Self> {
        let transport = HttpTransport::new(
            "platform",
            &config.headers,
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(Self::new(config.platform_url.clone(), transport))
    }

    fn reset_url(&self) -> String {
        format!("{}{}", self.platform_url.trim_end_matches('/'), RESET_PATH)
    }
}

#[async_trait]
impl ChainReset for PlatformClient {
    async fn reset(&self, block_number: u64) -> Result<()> {
        tracing::info!(block_number = block_number, "Resetting fork");

        let response = self
            .transport
            .request(
                HttpMethod::Post,
                &self.reset_url(),
                Some(&json!({ "blockNumber": block_number })),
            )
            .await?;

        if !response.is_success() {
            return Err(TransportError::HttpStatus {
                service: self.transport.service().to_string(),
                status: response.status,
            }
            .into());
        }

        Ok(())
    }
}

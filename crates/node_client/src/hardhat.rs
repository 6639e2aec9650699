//! Hardhat control methods over JSON-RPC

use crate::traits::DevNode;
use crate::transport::{HttpMethod, HttpTransport};
use alloy::primitives::Address;
use async_trait::async_trait;
use config::NodeConfig;
use serde_json::{json, Value};
use std::time::Duration;
use types::{DevNodeMethod, Result, RpcRequest, SimulatorError, SET_BALANCE_AMOUNT_HEX};

/// JSON-RPC client for the hardhat-specific methods of a dev node
#[derive(Debug, Clone)]
pub struct HardhatClient {
    node_url: String,
    transport: HttpTransport,
}

impl HardhatClient {
    /// Create a client posting to `node_url` through `transport`
    pub fn new(node_url: impl Into<String>, transport: HttpTransport) -> Self {
        Self {
            node_url: node_url.into(),
            transport,
        }
    }

    /// Create a client from node configuration
    pub fn from_config(config: &NodeConfig) -> Result<Self> {
        let transport = HttpTransport::new(
            "hardhat",
            &config.headers,
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(Self::new(config.rpc_url.clone(), transport))
    }

    async fn rpc_call(&self, method: DevNodeMethod, params: Value) -> Result<String> {
        let request = RpcRequest::new(method, params);
        let payload = serde_json::to_value(&request)
            .map_err(|e| SimulatorError::format("params", format!("cannot encode {}: {}", method, e)))?;

        let response = self
            .transport
            .request(HttpMethod::Post, &self.node_url, Some(&payload))
            .await?;

        tracing::debug!(method = %method, status = response.status, "Dev node responded");

        Ok(response.body)
    }
}

#[async_trait]
impl DevNode for HardhatClient {
    async fn impersonate_account(&self, accounts: &[Address]) -> Result<String> {
        self.rpc_call(DevNodeMethod::ImpersonateAccount, json!(accounts)).await
    }

    async fn stop_impersonating_account(&self, accounts: &[Address]) -> Result<String> {
        self.rpc_call(DevNodeMethod::StopImpersonatingAccount, json!(accounts)).await
    }

    async fn mine(&self, count: u64) -> Result<String> {
        if count == 0 {
            return Err(SimulatorError::ParameterValidation(
                "mine count must be greater than zero".to_string(),
            ));
        }
        self.rpc_call(DevNodeMethod::Mine, json!([format!("0x{:x}", count)])).await
    }

    async fn set_balance(&self, account: Address) -> Result<String> {
        self.rpc_call(DevNodeMethod::SetBalance, json!([account, SET_BALANCE_AMOUNT_HEX]))
            .await
    }

    async fn debug_trace_transaction(&self, tx_hashes: &[String]) -> Result<String> {
        self.rpc_call(DevNodeMethod::DebugTraceTransaction, json!(tx_hashes)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const ACCOUNT: &str = "0x8Fd30ec7FF8B74bcbc3daB47601c3DE4Afb34A5E";

    fn client(server: &MockServer) -> HardhatClient {
        let config = NodeConfig {
            rpc_url: server.uri(),
            ..NodeConfig::default()
        };
        HardhatClient::from_config(&config).unwrap()
    }

    fn ok_body() -> Value {
        json!({"jsonrpc": "2.0", "id": 1, "result": true})
    }

    #[tokio::test]
    async fn test_mine_encodes_hex_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(json!({
                "jsonrpc": "2.0",
                "method": "hardhat_mine",
                "params": ["0x1a"],
                "id": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = client(&mock_server).mine(26).await.unwrap();
        assert!(body.contains("\"result\":true"));
    }

    #[tokio::test]
    async fn test_mine_zero_is_rejected_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).mine(0).await;
        assert!(matches!(result, Err(SimulatorError::ParameterValidation(_))));
    }

    #[tokio::test]
    async fn test_impersonate_account_params() {
        let mock_server = MockServer::start().await;
        let account: Address = ACCOUNT.parse().unwrap();

        Mock::given(method("POST"))
            .and(body_json(json!({
                "jsonrpc": "2.0",
                "method": "hardhat_impersonateAccount",
                "params": [account],
                "id": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server).impersonate_account(&[account]).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_balance_uses_fixed_amount() {
        let mock_server = MockServer::start().await;
        let account: Address = ACCOUNT.parse().unwrap();

        Mock::given(method("POST"))
            .and(body_json(json!({
                "jsonrpc": "2.0",
                "method": "hardhat_setBalance",
                "params": [account, "0x21e19e0c9bab2400000"],
                "id": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server).set_balance(account).await.unwrap();
    }

    #[tokio::test]
    async fn test_trace_returns_raw_body() {
        let mock_server = MockServer::start().await;
        let hash = "0xaf9dcfa3906f24e184f0fab41dc7285e7c584ae34070c6ca33da4a2e80afc064".to_string();
        let trace = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"gas": 21000, "failed": false, "returnValue": "", "structLogs": []}
        });

        Mock::given(method("POST"))
            .and(body_json(json!({
                "jsonrpc": "2.0",
                "method": "debug_traceTransaction",
                "params": [hash],
                "id": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(trace.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = client(&mock_server)
            .debug_trace_transaction(&[hash])
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, trace);
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        let config = NodeConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            ..NodeConfig::default()
        };
        let client = HardhatClient::from_config(&config).unwrap();

        let result = client.stop_impersonating_account(&[Address::ZERO]).await;
        assert!(matches!(result, Err(SimulatorError::Transport { .. })));
    }
}

//! JSON-RPC envelopes exchanged with the dev node

use crate::constants::{JSONRPC_ID, JSONRPC_VERSION};
use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Dev-node specific JSON-RPC methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DevNodeMethod {
    #[serde(rename = "hardhat_impersonateAccount")]
    ImpersonateAccount,
    #[serde(rename = "hardhat_stopImpersonatingAccount")]
    StopImpersonatingAccount,
    #[serde(rename = "hardhat_mine")]
    Mine,
    #[serde(rename = "hardhat_setBalance")]
    SetBalance,
    #[serde(rename = "debug_traceTransaction")]
    DebugTraceTransaction,
}

impl DevNodeMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            DevNodeMethod::ImpersonateAccount => "hardhat_impersonateAccount",
            DevNodeMethod::StopImpersonatingAccount => "hardhat_stopImpersonatingAccount",
            DevNodeMethod::Mine => "hardhat_mine",
            DevNodeMethod::SetBalance => "hardhat_setBalance",
            DevNodeMethod::DebugTraceTransaction => "debug_traceTransaction",
        }
    }
}

impl fmt::Display for DevNodeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing JSON-RPC request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version
    pub jsonrpc: String,
    /// Method name
    pub method: DevNodeMethod,
    /// Positional parameters
    pub params: Value,
    /// Request ID
    pub id: u64,
}

/// Incoming JSON-RPC response, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcEnvelope {
    /// JSON-RPC version
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Correlation id
    #[serde(default)]
    pub id: Option<Value>,
    /// Result payload of unspecified shape
    #[serde(default)]
    pub result: Value,
    /// Error object, if the node refused the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Additional error data
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcRequest {
    /// Create a request with the fixed version tag and id
    pub fn new(method: DevNodeMethod, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method,
            params,
            id: JSONRPC_ID,
        }
    }
}

impl RpcEnvelope {
    /// Whether version tag and id match what this client sent
    pub fn is_expected(&self) -> bool {
        self.jsonrpc.as_deref() == Some(JSONRPC_VERSION)
            && self.id.as_ref().and_then(Value::as_u64) == Some(JSONRPC_ID)
    }
}

/// Decode a raw response body and return its result payload.
///
/// The version/id check runs before anything else, so a mismatched envelope is a
/// protocol error even when the HTTP status was 200.
pub fn decode_envelope(body: &str) -> Result<Value> {
    let envelope: RpcEnvelope = serde_json::from_str(body).map_err(|e| {
        SimulatorError::ProtocolMismatch(format!("response is not a JSON-RPC envelope: {}", e))
    })?;

    if !envelope.is_expected() {
        return Err(SimulatorError::ProtocolMismatch(format!(
            "expected jsonrpc {} and id {}, got jsonrpc {:?} and id {:?}",
            JSONRPC_VERSION, JSONRPC_ID, envelope.jsonrpc, envelope.id
        )));
    }

    if let Some(error) = envelope.error {
        return Err(SimulatorError::NodeRpc {
            code: error.code,
            message: error.message,
        });
    }

    Ok(envelope.result)
}

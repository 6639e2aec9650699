//! Error types for the simulator SDK

use thiserror::Error;

/// Main error type for the simulator SDK
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// Malformed transaction request or call arguments
    #[error("Transaction parameter error: {0}")]
    ParameterValidation(String),

    /// Missing or invalid private key material
    #[error("Signing key error: {0}")]
    SigningKey(String),

    /// JSON-RPC envelope failed the version/id check
    #[error("JSON-RPC protocol mismatch: {0}")]
    ProtocolMismatch(String),

    /// Well-formed JSON-RPC envelope carrying an error object
    #[error("Dev node rejected call (code {code}): {message}")]
    NodeRpc { code: i64, message: String },

    /// HTTP-level errors
    #[error("Transport error: {service}: {message}")]
    Transport { service: String, message: String },

    /// Decimal or hex field could not be converted
    #[error("Format conversion error: {field}: {message}")]
    FormatConversion { field: String, message: String },

    /// Chain query errors
    #[error("Chain client error: {0}")]
    Chain(String),

    /// Signed transaction was refused by the chain client
    #[error("Broadcast failed: {0}")]
    Broadcast(String),

    /// The transaction is live but the impersonation was not revoked
    #[error("Transaction {tx_hash} broadcast but impersonation cleanup failed: {message}")]
    CleanupAfterBroadcast { tx_hash: String, message: String },

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// HTTP transport specific errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request did not complete in time
    #[error("Request to {service} timed out")]
    Timeout { service: String },

    /// Connection could not be established or was dropped
    #[error("Connection to {service} failed: {message}")]
    Connection { service: String, message: String },

    /// Non-success HTTP status where one is required
    #[error("HTTP error from {service}: {status}")]
    HttpStatus { service: String, status: u16 },

    /// Response body could not be read
    #[error("Unreadable response body from {service}: {message}")]
    Body { service: String, message: String },

    /// Invalid URL or header configuration
    #[error("Invalid request to {service}: {message}")]
    InvalidRequest { service: String, message: String },
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl SimulatorError {
    /// Shorthand for a format conversion error on a named field
    pub fn format(field: &str, message: impl Into<String>) -> Self {
        SimulatorError::FormatConversion {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether the signed transaction may have reached the node despite the error
    pub fn transaction_may_be_live(&self) -> bool {
        matches!(self, SimulatorError::CleanupAfterBroadcast { .. })
    }
}

impl From<TransportError> for SimulatorError {
    fn from(err: TransportError) -> Self {
        let service = match &err {
            TransportError::Timeout { service }
            | TransportError::Connection { service, .. }
            | TransportError::HttpStatus { service, .. }
            | TransportError::Body { service, .. }
            | TransportError::InvalidRequest { service, .. } => service.clone(),
        };
        SimulatorError::Transport {
            service,
            message: err.to_string(),
        }
    }
}

impl From<ConfigError> for SimulatorError {
    fn from(err: ConfigError) -> Self {
        SimulatorError::Config(err.to_string())
    }
}

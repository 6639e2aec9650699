//! Simulator traits and interfaces

use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use types::{Result, TransactionRequest};

/// Transaction validation result
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the request is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings
    pub warnings: Vec<String>,
}

/// The SDK surface: simulate a transaction and inspect the dev chain
#[async_trait]
pub trait Simulator: Send + Sync {
    /// Replay `request` on the dev node and return the broadcast transaction hash.
    ///
    /// On return the request holds the effective chain id, block number and nonce.
    async fn simulate_transaction(&self, request: &mut TransactionRequest) -> Result<String>;

    /// Raw `debug_traceTransaction` response for the given hashes
    async fn debug_trace_transaction(&self, tx_hashes: &[String]) -> Result<String>;

    /// Mine `count` blocks, returning the raw node response
    async fn mine(&self, count: u64) -> Result<String>;

    /// Re-fork the backing chain at `block_number`
    async fn reset_block_number(&self, block_number: u64) -> Result<()>;

    /// Give `account` the fixed dev balance, returning the raw node response
    async fn set_balance(&self, account: Address) -> Result<String>;

    /// Current block height
    async fn block_number(&self) -> Result<u64>;

    /// Balance in native units, for display only
    async fn balance_at(&self, account: &str, block_number: Option<u64>) -> Result<f64>;

    /// Nonce at a block, latest when `None`
    async fn nonce_at(&self, account: Address, block_number: Option<u64>) -> Result<u64>;

    /// Suggested gas price in wei
    async fn suggest_gas_price(&self) -> Result<u128>;

    /// Pending balance in wei
    async fn pending_balance_at(&self, account: Address) -> Result<U256>;

    /// Pending storage slot value
    async fn pending_storage_at(&self, account: Address, slot: B256) -> Result<B256>;

    /// Pending contract code
    async fn pending_code_at(&self, account: Address) -> Result<Bytes>;

    /// Pending nonce
    async fn pending_nonce_at(&self, account: Address) -> Result<u64>;

    /// Transactions in the pending block
    async fn pending_transaction_count(&self) -> Result<u64>;

    /// Address of the signing account
    fn signer_address(&self) -> Address;
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

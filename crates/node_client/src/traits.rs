//! Capability traits for the remote collaborators of the simulator

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use async_trait::async_trait;
use types::Result;

/// Dev-node specific JSON-RPC control methods.
///
/// Every method returns the raw response body; validating the JSON-RPC
/// envelope is left to the caller.
#[async_trait]
pub trait DevNode: Send + Sync {
    /// Let the node accept transactions sent from `accounts` without their keys
    async fn impersonate_account(&self, accounts: &[Address]) -> Result<String>;

    /// Revoke a previous impersonation
    async fn stop_impersonating_account(&self, accounts: &[Address]) -> Result<String>;

    /// Mine `count` blocks; zero is an error, not a no-op
    async fn mine(&self, count: u64) -> Result<String>;

    /// Set the balance of `account` to the fixed dev amount
    async fn set_balance(&self, account: Address) -> Result<String>;

    /// Fetch debugger traces for the given transaction hashes
    async fn debug_trace_transaction(&self, tx_hashes: &[String]) -> Result<String>;
}

/// Resets the fork backing the dev node
#[async_trait]
pub trait ChainReset: Send + Sync {
    /// Re-fork the chain at `block_number`
    async fn reset(&self, block_number: u64) -> Result<()>;
}

/// Standard chain queries and transaction broadcast
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Suggested gas price in wei
    async fn suggest_gas_price(&self) -> Result<u128>;

    /// Balance at a block, latest when `None`
    async fn balance_at(&self, account: Address, block_number: Option<u64>) -> Result<U256>;

    /// Balance including pending state
    async fn pending_balance_at(&self, account: Address) -> Result<U256>;

    /// Nonce at a block, latest when `None`
    async fn nonce_at(&self, account: Address, block_number: Option<u64>) -> Result<u64>;

    /// Nonce including pending transactions
    async fn pending_nonce_at(&self, account: Address) -> Result<u64>;

    /// Storage slot value in pending state
    async fn pending_storage_at(&self, account: Address, slot: B256) -> Result<B256>;

    /// Contract code in pending state
    async fn pending_code_at(&self, account: Address) -> Result<Bytes>;

    /// Number of transactions in the pending block
    async fn pending_transaction_count(&self) -> Result<u64>;

    /// Current block height
    async fn block_number(&self) -> Result<u64>;

    /// Broadcast an EIP-2718 encoded signed transaction
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash>;
}

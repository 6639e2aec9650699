//! Standard chain queries through an alloy HTTP provider

use crate::traits::ChainClient;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256, U64};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::{BlockId, BlockNumberOrTag};
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use std::fmt;
use types::{Result, SimulatorError};

/// Pass-through chain client backed by a JSON-RPC provider
#[derive(Clone)]
pub struct ProviderChainClient {
    rpc_url: String,
    provider: RootProvider<Http<Client>>,
}

impl ProviderChainClient {
    /// Connect to the node at `rpc_url`
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url: reqwest::Url = rpc_url
            .parse()
            .map_err(|_| SimulatorError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            provider: RootProvider::new_http(url),
        })
    }
}

impl fmt::Debug for ProviderChainClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChainClient")
            .field("rpc_url", &self.rpc_url)
            .finish_non_exhaustive()
    }
}

fn chain_error(context: &str, err: impl fmt::Display) -> SimulatorError {
    SimulatorError::Chain(format!("{}: {}", context, err))
}

#[async_trait]
impl ChainClient for ProviderChainClient {
    async fn suggest_gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| chain_error("eth_gasPrice failed", e))
    }

    async fn balance_at(&self, account: Address, block_number: Option<u64>) -> Result<U256> {
        let call = self.provider.get_balance(account);
        let balance = match block_number {
            Some(number) => call.block_id(BlockId::number(number)).await,
            None => call.await,
        };
        balance.map_err(|e| chain_error("eth_getBalance failed", e))
    }

    async fn pending_balance_at(&self, account: Address) -> Result<U256> {
        self.provider
            .get_balance(account)
            .pending()
            .await
            .map_err(|e| chain_error("eth_getBalance failed", e))
    }

    async fn nonce_at(&self, account: Address, block_number: Option<u64>) -> Result<u64> {
        let call = self.provider.get_transaction_count(account);
        let nonce = match block_number {
            Some(number) => call.block_id(BlockId::number(number)).await,
            None => call.await,
        };
        nonce.map_err(|e| chain_error("eth_getTransactionCount failed", e))
    }

    async fn pending_nonce_at(&self, account: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(account)
            .pending()
            .await
            .map_err(|e| chain_error("eth_getTransactionCount failed", e))
    }

    async fn pending_storage_at(&self, account: Address, slot: B256) -> Result<B256> {
        let value = self
            .provider
            .get_storage_at(account, U256::from_be_bytes(slot.0))
            .pending()
            .await
            .map_err(|e| chain_error("eth_getStorageAt failed", e))?;
        Ok(B256::from(value.to_be_bytes::<32>()))
    }

    async fn pending_code_at(&self, account: Address) -> Result<Bytes> {
        self.provider
            .get_code_at(account)
            .pending()
            .await
            .map_err(|e| chain_error("eth_getCode failed", e))
    }

    async fn pending_transaction_count(&self) -> Result<u64> {
        let count: U64 = self
            .provider
            .raw_request(
                "eth_getBlockTransactionCountByNumber".into(),
                (BlockNumberOrTag::Pending,),
            )
            .await
            .map_err(|e| chain_error("eth_getBlockTransactionCountByNumber failed", e))?;
        Ok(count.to::<u64>())
    }

    async fn block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| chain_error("eth_blockNumber failed", e))
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| SimulatorError::Broadcast(e.to_string()))?;
        Ok(*pending.tx_hash())
    }
}

//! Simulation engine implementations

use crate::signing::SignerAccount;
use crate::traits::Simulator;
use crate::validation::{BasicRequestValidator, RequestValidator};
use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use config::Config;
use node_client::{ChainClient, ChainReset, DevNode, HardhatClient, PlatformClient, ProviderChainClient};
use types::utils::{is_valid_address, is_valid_tx_hash, wei_to_eth};
use types::{decode_envelope, Result, SimulatorError, TransactionRequest, DEV_CHAIN_ID};

/// Simulator driving a forked dev node through its three collaborators
#[derive(Debug)]
pub struct EvmSimulator<D, R, C> {
    dev_node: D,
    reset: R,
    chain: C,
    account: SignerAccount,
    validator: BasicRequestValidator,
}

/// Simulator wired to a real hardhat node, platform and JSON-RPC provider
pub type HttpSimulator = EvmSimulator<HardhatClient, PlatformClient, ProviderChainClient>;

impl<D, R, C> EvmSimulator<D, R, C>
where
    D: DevNode,
    R: ChainReset,
    C: ChainClient,
{
    pub fn new(dev_node: D, reset: R, chain: C, account: SignerAccount) -> Self {
        Self {
            dev_node,
            reset,
            chain,
            account,
            validator: BasicRequestValidator::new(),
        }
    }

    /// Mine until the node reaches `target`. Never mines when already at or past it.
    async fn auto_mine(&self, target: u64) -> Result<()> {
        let current = self.chain.block_number().await?;
        if target <= current {
            tracing::debug!(current = current, target = target, "No blocks to mine");
            return Ok(());
        }

        let count = target - current;
        tracing::info!(current = current, target = target, count = count, "Mining to target height");
        let body = self.dev_node.mine(count).await?;
        decode_envelope(&body)?;
        Ok(())
    }
}

impl HttpSimulator {
    /// Build a simulator from configuration; the signing key is required
    pub fn connect(config: &Config) -> Result<Self> {
        let private_key = config
            .signer
            .private_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SimulatorError::SigningKey("no private key configured (PK)".to_string()))?;

        let account = SignerAccount::from_private_key(private_key)?;
        let dev_node = HardhatClient::from_config(&config.node)?;
        let reset = PlatformClient::from_config(&config.node)?;
        let chain = ProviderChainClient::new(&config.node.rpc_url)?;

        tracing::info!(
            rpc_url = %config.node.rpc_url,
            platform_url = %config.node.platform_url,
            signer = %account.address(),
            "Simulator connected"
        );

        Ok(Self::new(dev_node, reset, chain, account))
    }
}

fn parse_account(field: &str, value: &str) -> Result<Address> {
    if !is_valid_address(value) {
        return Err(SimulatorError::ParameterValidation(format!(
            "{} is not a valid address: {:?}",
            field, value
        )));
    }
    value
        .parse()
        .map_err(|e| SimulatorError::ParameterValidation(format!("{}: {}", field, e)))
}

#[async_trait]
impl<D, R, C> Simulator for EvmSimulator<D, R, C>
where
    D: DevNode,
    R: ChainReset,
    C: ChainClient,
{
    async fn simulate_transaction(&self, request: &mut TransactionRequest) -> Result<String> {
        let validation = self.validator.validate_complete(request);
        for warning in &validation.warnings {
            tracing::warn!(warning = %warning, "Transaction request warning");
        }
        if validation.has_errors() {
            return Err(SimulatorError::ParameterValidation(validation.errors.join("; ")));
        }

        let from = parse_account("from", &request.from)?;
        request.chain_id = DEV_CHAIN_ID;

        tracing::info!(from = %from, to = %request.to, block_number = request.block_number, "Simulating transaction");

        let body = self.dev_node.impersonate_account(&[from]).await?;
        decode_envelope(&body)?;
        tracing::debug!(account = %from, "Impersonating account");

        if let Some(block_number) = request.block_number_override() {
            self.reset.reset(block_number).await?;
            request.block_number = block_number;
        }

        self.auto_mine(request.block_number).await?;

        request.nonce = self.chain.nonce_at(self.account.address(), None).await?;

        let signed = self.account.sign_request(request)?;
        tracing::debug!(tx_hash = %signed.hash, nonce = request.nonce, "Signed transaction");

        self.chain.send_raw_transaction(&signed.raw).await?;
        let tx_hash = signed.hash.to_string();
        tracing::info!(tx_hash = %tx_hash, "Transaction broadcast");

        let cleanup = match self.dev_node.stop_impersonating_account(&[from]).await {
            Ok(body) => decode_envelope(&body).map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = cleanup {
            tracing::warn!(tx_hash = %tx_hash, account = %from, error = %e, "Impersonation still active");
            return Err(SimulatorError::CleanupAfterBroadcast {
                tx_hash,
                message: e.to_string(),
            });
        }

        Ok(tx_hash)
    }

    async fn debug_trace_transaction(&self, tx_hashes: &[String]) -> Result<String> {
        if let Some(bad) = tx_hashes.iter().find(|hash| !is_valid_tx_hash(hash)) {
            return Err(SimulatorError::ParameterValidation(format!(
                "not a transaction hash: {:?}",
                bad
            )));
        }
        self.dev_node.debug_trace_transaction(tx_hashes).await
    }

    async fn mine(&self, count: u64) -> Result<String> {
        self.dev_node.mine(count).await
    }

    async fn reset_block_number(&self, block_number: u64) -> Result<()> {
        self.reset.reset(block_number).await
    }

    async fn set_balance(&self, account: Address) -> Result<String> {
        self.dev_node.set_balance(account).await
    }

    async fn block_number(&self) -> Result<u64> {
        self.chain.block_number().await
    }

    async fn balance_at(&self, account: &str, block_number: Option<u64>) -> Result<f64> {
        let account = parse_account("account", account)?;
        let wei = self.chain.balance_at(account, block_number).await?;
        Ok(wei_to_eth(wei))
    }

    async fn nonce_at(&self, account: Address, block_number: Option<u64>) -> Result<u64> {
        self.chain.nonce_at(account, block_number).await
    }

    async fn suggest_gas_price(&self) -> Result<u128> {
        self.chain.suggest_gas_price().await
    }

    async fn pending_balance_at(&self, account: Address) -> Result<U256> {
        self.chain.pending_balance_at(account).await
    }

    async fn pending_storage_at(&self, account: Address, slot: B256) -> Result<B256> {
        self.chain.pending_storage_at(account, slot).await
    }

    async fn pending_code_at(&self, account: Address) -> Result<Bytes> {
        self.chain.pending_code_at(account).await
    }

    async fn pending_nonce_at(&self, account: Address) -> Result<u64> {
        self.chain.pending_nonce_at(account).await
    }

    async fn pending_transaction_count(&self) -> Result<u64> {
        self.chain.pending_transaction_count().await
    }

    fn signer_address(&self) -> Address {
        self.account.address()
    }
}

//! Command line definitions and dispatch

use alloy::primitives::{Address, B256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ConfigLoader;
use simulator::Simulator;
use std::path::{Path, PathBuf};
use types::TransactionRequest;

#[derive(Debug, Parser)]
#[command(name = "simulator", version, about = "Replay transactions on a forked hardhat node")]
pub struct Cli {
    /// Configuration file; falls back to CONFIG_PATH, then config.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate the transaction request stored in a JSON file
    Simulate { request: PathBuf },
    /// Print debugger traces for transaction hashes
    Trace {
        #[arg(required = true)]
        hashes: Vec<String>,
    },
    /// Mine blocks on the dev node
    Mine { count: u64 },
    /// Re-fork the dev chain at a block height
    Reset { block: u64 },
    /// Fund an account with the fixed dev balance
    SetBalance { address: Address },
    /// Print the current block height
    BlockNumber,
    /// Print an account balance
    Balance {
        address: String,
        /// Pending balance in wei instead of latest in native units
        #[arg(long)]
        pending: bool,
    },
    /// Print an account nonce
    Nonce {
        address: Address,
        #[arg(long)]
        pending: bool,
    },
    /// Print the suggested gas price in wei
    GasPrice,
    /// Print contract code in pending state
    Code { address: Address },
    /// Print a storage slot in pending state
    Storage { address: Address, slot: B256 },
    /// Print the number of transactions in the pending block
    PendingTxCount,
    /// Write an example configuration file
    ExampleConfig { path: PathBuf },
}

impl Command {
    /// Whether the command talks to the node and needs a signing account
    pub fn needs_simulator(&self) -> bool {
        !matches!(self, Command::ExampleConfig { .. })
    }
}

/// Read a transaction request from a JSON file
pub fn read_request(path: &Path) -> Result<TransactionRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}

/// Run a command that does not need a node connection
pub fn run_offline(command: &Command) -> Result<()> {
    if let Command::ExampleConfig { path } = command {
        ConfigLoader::create_example(path)?;
        println!("Example configuration written to {}", path.display());
    }
    Ok(())
}

/// Run a command against the simulator and print its output
pub async fn run(simulator: &dyn Simulator, command: Command) -> Result<()> {
    match command {
        Command::Simulate { request } => {
            let mut request = read_request(&request)?;
            let tx_hash = simulator.simulate_transaction(&mut request).await?;
            tracing::info!(
                chain_id = request.chain_id,
                block_number = request.block_number,
                nonce = request.nonce,
                "Simulation complete"
            );
            println!("{}", tx_hash);
        }
        Command::Trace { hashes } => {
            println!("{}", simulator.debug_trace_transaction(&hashes).await?);
        }
        Command::Mine { count } => {
            println!("{}", simulator.mine(count).await?);
        }
        Command::Reset { block } => {
            simulator.reset_block_number(block).await?;
            println!("Reset to block {}", block);
        }
        Command::SetBalance { address } => {
            println!("{}", simulator.set_balance(address).await?);
        }
        Command::BlockNumber => {
            println!("{}", simulator.block_number().await?);
        }
        Command::Balance { address, pending } => {
            if pending {
                let account: Address = address
                    .parse()
                    .with_context(|| format!("Invalid address {}", address))?;
                println!("{}", simulator.pending_balance_at(account).await?);
            } else {
                println!("{}", simulator.balance_at(&address, None).await?);
            }
        }
        Command::Nonce { address, pending } => {
            let nonce = if pending {
                simulator.pending_nonce_at(address).await?
            } else {
                simulator.nonce_at(address, None).await?
            };
            println!("{}", nonce);
        }
        Command::GasPrice => {
            println!("{}", simulator.suggest_gas_price().await?);
        }
        Command::Code { address } => {
            println!("{}", simulator.pending_code_at(address).await?);
        }
        Command::Storage { address, slot } => {
            println!("{}", simulator.pending_storage_at(address, slot).await?);
        }
        Command::PendingTxCount => {
            println!("{}", simulator.pending_transaction_count().await?);
        }
        Command::ExampleConfig { .. } => run_offline(&command)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["simulator", "mine", "5"]);
        assert!(matches!(cli.command, Command::Mine { count: 5 }));

        let cli = Cli::parse_from([
            "simulator",
            "nonce",
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "--pending",
        ]);
        assert!(matches!(cli.command, Command::Nonce { pending: true, .. }));

        let cli = Cli::parse_from(["simulator", "example-config", "out.yaml"]);
        assert!(!cli.command.needs_simulator());
    }

    #[test]
    fn test_invalid_address_rejected_by_parser() {
        let result = Cli::try_parse_from(["simulator", "code", "0x1234"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_request() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "chain_id": 1,
                "block_number": 14829628,
                "from": "0x8Fd30ec7FF8B74bcbc3daB47601c3DE4Afb34A5E",
                "to": "0xA51Fc19f0430614F22B9Caf10491298E5D571313",
                "gas": 21000,
                "gas_price": "100",
                "gas_tips": "2",
                "value": "3",
                "overrides": {{"block_num": 14834856}}
            }}"#
        )
        .unwrap();

        let request = read_request(file.path()).unwrap();
        assert_eq!(request.gas_limit, 21000);
        assert_eq!(request.gas_tip, "2");
        assert_eq!(request.block_number_override(), Some(14834856));
    }

    #[test]
    fn test_read_request_missing_file() {
        assert!(read_request(Path::new("/nonexistent/request.json")).is_err());
    }
}

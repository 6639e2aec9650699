//! Transaction request submitted for simulation

use alloy::eips::eip2930::AccessList;
use serde::{Deserialize, Serialize};

/// A fully specified transaction to replay on the dev node.
///
/// Missing numeric fields deserialize to zero and are then rejected by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransactionRequest {
    /// Caller-supplied chain id; replaced by the dev chain id before signing
    pub chain_id: u64,
    /// Block height the transaction should execute at
    pub block_number: u64,
    /// Position within the original block
    pub transaction_index: i64,
    /// Sender to impersonate
    pub from: String,
    /// Overwritten with the signer's live nonce before signing
    pub nonce: u64,
    /// Hex call data, `0x` or empty for a plain transfer
    pub input: String,
    /// Destination address
    pub to: String,
    /// Gas limit
    #[serde(rename = "gas")]
    pub gas_limit: u64,
    /// Max fee per gas in wei, base-10
    pub gas_price: String,
    /// Max priority fee per gas in wei, base-10
    #[serde(rename = "gas_tips")]
    pub gas_tip: String,
    /// Amount in native units, may carry a fraction
    pub value: String,
    /// EIP-2930 access list
    pub access_list: AccessList,
    /// Chain-state overrides
    pub overrides: TxOverrides,
}

/// Chain-state overrides applied before the transaction runs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TxOverrides {
    /// Reset the fork to this height first; zero means no reset
    #[serde(rename = "block_num")]
    pub block_number_override: u64,
}

impl TransactionRequest {
    /// The requested fork height, if any
    pub fn block_number_override(&self) -> Option<u64> {
        match self.overrides.block_number_override {
            0 => None,
            height => Some(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_platform_payload() {
        let payload = r#"{"chain_id":1,"block_number":14829628,"transaction_index":0,"from":"0x8Fd30ec7FF8B74bcbc3daB47601c3DE4Afb34A5E","input":"0x","to":"0xA51Fc19f0430614F22B9Caf10491298E5D571313","gas":21000,"gas_price":"100","gas_tips":"2","value":"3","access_list":[],"overrides":{"block_num":14834856}}"#;

        let request: TransactionRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(request.chain_id, 1);
        assert_eq!(request.block_number, 14829628);
        assert_eq!(request.gas_limit, 21000);
        assert_eq!(request.gas_tip, "2");
        assert_eq!(request.nonce, 0);
        assert!(request.access_list.0.is_empty());
        assert_eq!(request.block_number_override(), Some(14834856));
    }

    #[test]
    fn test_missing_overrides_means_no_reset() {
        let request: TransactionRequest = serde_json::from_str(r#"{"chain_id":1}"#).unwrap();
        assert_eq!(request.block_number_override(), None);
        assert_eq!(request.block_number, 0);
    }

    #[test]
    fn test_access_list_wire_format() {
        let payload = r#"{"access_list":[{"address":"0xA51Fc19f0430614F22B9Caf10491298E5D571313","storageKeys":["0x0000000000000000000000000000000000000000000000000000000000000001"]}]}"#;
        let request: TransactionRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(request.access_list.0.len(), 1);
        assert_eq!(request.access_list.0[0].storage_keys.len(), 1);
    }
}

//! Signing account and dynamic-fee transaction construction

use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxHash, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use std::fmt;
use std::str::FromStr;
use types::utils::{decode_hex_input, parse_decimal_integer, parse_native_amount};
use types::{Result, SimulatorError, TransactionRequest};

/// The simulator's own key. Never serialized, and `Debug` prints only the address.
#[derive(Clone)]
pub struct SignerAccount {
    signer: PrivateKeySigner,
}

/// A signed transaction ready for broadcast
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    /// Transaction hash
    pub hash: TxHash,
    /// EIP-2718 encoding
    pub raw: Bytes,
    /// Decoded form
    pub envelope: TxEnvelope,
}

impl SignerAccount {
    /// Load an account from a hex private key, with or without `0x`
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(private_key.trim())
            .map_err(|e| SimulatorError::SigningKey(format!("invalid private key: {}", e)))?;
        Ok(Self { signer })
    }

    /// Address derived from the key
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Build the EIP-1559 transaction described by `request` and sign it for
    /// `request.chain_id`.
    pub fn sign_request(&self, request: &TransactionRequest) -> Result<SignedTransaction> {
        let to: Address = request
            .to
            .parse()
            .map_err(|e| SimulatorError::format("to", format!("invalid address: {}", e)))?;

        let mut tx = TxEip1559 {
            chain_id: request.chain_id,
            nonce: request.nonce,
            gas_limit: request.gas_limit,
            max_fee_per_gas: parse_decimal_integer("gas_price", &request.gas_price)?,
            max_priority_fee_per_gas: parse_decimal_integer("gas_tips", &request.gas_tip)?,
            to: TxKind::Call(to),
            value: parse_native_amount("value", &request.value)?,
            access_list: request.access_list.clone(),
            input: decode_hex_input("input", &request.input)?,
        };

        let signer = self.signer.clone().with_chain_id(Some(request.chain_id));
        let signature = signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| SimulatorError::SigningKey(format!("signing failed: {}", e)))?;

        let signed = tx.into_signed(signature);
        let hash = *signed.hash();
        let envelope = TxEnvelope::from(signed);
        let raw = Bytes::from(envelope.encoded_2718());

        Ok(SignedTransaction { hash, raw, envelope })
    }
}

impl fmt::Debug for SignerAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerAccount")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::eips::eip2718::Decodable2718;
    use alloy::primitives::{keccak256, U256};
    use types::DEV_CHAIN_ID;

    // First default hardhat account
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn request() -> TransactionRequest {
        TransactionRequest {
            chain_id: DEV_CHAIN_ID,
            block_number: 14829628,
            from: "0x8Fd30ec7FF8B74bcbc3daB47601c3DE4Afb34A5E".to_string(),
            to: "0xA51Fc19f0430614F22B9Caf10491298E5D571313".to_string(),
            nonce: 4,
            input: String::new(),
            gas_limit: 21000,
            gas_price: "100".to_string(),
            gas_tip: "2".to_string(),
            value: "3".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_account_from_key() {
        let account = SignerAccount::from_private_key(DEV_KEY).unwrap();
        assert_eq!(account.address(), DEV_ADDRESS.parse::<Address>().unwrap());

        let prefixed = SignerAccount::from_private_key(&format!("0x{}", DEV_KEY)).unwrap();
        assert_eq!(prefixed.address(), account.address());
    }

    #[test]
    fn test_invalid_key() {
        for key in ["", "0x1234", "zz"] {
            assert!(matches!(
                SignerAccount::from_private_key(key),
                Err(SimulatorError::SigningKey(_))
            ));
        }
    }

    #[test]
    fn test_debug_hides_key() {
        let account = SignerAccount::from_private_key(DEV_KEY).unwrap();
        let printed = format!("{:?}", account);
        assert!(!printed.contains("ac0974"));
    }

    #[test]
    fn test_sign_request() {
        let account = SignerAccount::from_private_key(DEV_KEY).unwrap();
        let signed = account.sign_request(&request()).unwrap();

        assert_eq!(signed.hash, keccak256(&signed.raw));

        let mut raw: &[u8] = &signed.raw;
        let decoded = TxEnvelope::decode_2718(&mut raw).unwrap();
        assert_eq!(*decoded.tx_hash(), signed.hash);

        let TxEnvelope::Eip1559(tx) = decoded else {
            panic!("expected a dynamic-fee transaction");
        };
        let tx = tx.tx();
        assert_eq!(tx.chain_id, DEV_CHAIN_ID);
        assert_eq!(tx.nonce, 4);
        assert_eq!(tx.gas_limit, 21000);
        assert_eq!(tx.max_fee_per_gas, 100);
        assert_eq!(tx.max_priority_fee_per_gas, 2);
        assert_eq!(tx.value, U256::from(3_000_000_000_000_000_000u128));
        assert!(tx.input.is_empty());
    }

    #[test]
    fn test_sign_request_with_calldata() {
        let account = SignerAccount::from_private_key(DEV_KEY).unwrap();
        let request = TransactionRequest {
            input: "0xa3cba09a".to_string(),
            value: "0".to_string(),
            ..request()
        };

        let signed = account.sign_request(&request).unwrap();
        let TxEnvelope::Eip1559(tx) = signed.envelope else {
            panic!("expected a dynamic-fee transaction");
        };
        assert_eq!(tx.tx().input.to_vec(), vec![0xa3, 0xcb, 0xa0, 0x9a]);
        assert_eq!(tx.tx().value, U256::ZERO);
    }

    #[test]
    fn test_format_errors() {
        let account = SignerAccount::from_private_key(DEV_KEY).unwrap();

        let bad_tip = TransactionRequest {
            gas_tip: "two".to_string(),
            ..request()
        };
        assert!(matches!(
            account.sign_request(&bad_tip),
            Err(SimulatorError::FormatConversion { ref field, .. }) if field == "gas_tips"
        ));

        let bad_value = TransactionRequest {
            value: "3 ether".to_string(),
            ..request()
        };
        assert!(matches!(
            account.sign_request(&bad_value),
            Err(SimulatorError::FormatConversion { ref field, .. }) if field == "value"
        ));

        let bad_input = TransactionRequest {
            input: "0xnothex".to_string(),
            ..request()
        };
        assert!(matches!(
            account.sign_request(&bad_input),
            Err(SimulatorError::FormatConversion { ref field, .. }) if field == "input"
        ));
    }
}

//! Transaction request validation

use crate::traits::ValidationResult;
use types::utils::{is_valid_address, parse_decimal_integer};
use types::{TransactionRequest, ADDRESS_LEN, DEV_CHAIN_ID, MIN_GAS_LIMIT};

/// Trait for transaction request validators
pub trait RequestValidator: Send + Sync {
    /// Validate address fields
    fn validate_format(&self, request: &TransactionRequest) -> ValidationResult;

    /// Validate chain id, block and index context
    fn validate_chain_context(&self, request: &TransactionRequest) -> ValidationResult;

    /// Validate gas parameters
    fn validate_gas(&self, request: &TransactionRequest) -> ValidationResult;

    /// Perform complete validation
    fn validate_complete(&self, request: &TransactionRequest) -> ValidationResult {
        let mut combined_result = ValidationResult::valid();

        combined_result.merge(self.validate_format(request));
        combined_result.merge(self.validate_chain_context(request));
        combined_result.merge(self.validate_gas(request));

        combined_result
    }
}

/// Validator enforcing the preconditions of a simulation
#[derive(Debug, Clone)]
pub struct BasicRequestValidator;

impl BasicRequestValidator {
    pub fn new() -> Self {
        Self
    }
}

fn check_address(result: &mut ValidationResult, field: &str, address: &str) {
    if address.len() != ADDRESS_LEN {
        result.add_error(format!(
            "{} must be {} characters, got {}",
            field,
            ADDRESS_LEN,
            address.len()
        ));
    } else if !is_valid_address(address) {
        result.add_error(format!("{} is not a 0x-prefixed hex address: {}", field, address));
    }
}

impl RequestValidator for BasicRequestValidator {
    fn validate_format(&self, request: &TransactionRequest) -> ValidationResult {
        let mut result = ValidationResult::valid();
        check_address(&mut result, "from", &request.from);
        check_address(&mut result, "to", &request.to);
        result
    }

    fn validate_chain_context(&self, request: &TransactionRequest) -> ValidationResult {
        let mut result = ValidationResult::valid();

        if request.chain_id < 1 {
            result.add_error("chain_id must be at least 1".to_string());
        } else if request.chain_id != DEV_CHAIN_ID {
            result.add_warning(format!(
                "chain_id {} will be replaced by {}",
                request.chain_id, DEV_CHAIN_ID
            ));
        }

        if request.block_number < 1 {
            result.add_error("block_number must be at least 1".to_string());
        }

        if request.transaction_index < 0 {
            result.add_error(format!(
                "transaction_index must not be negative, got {}",
                request.transaction_index
            ));
        }

        result
    }

    fn validate_gas(&self, request: &TransactionRequest) -> ValidationResult {
        let mut result = ValidationResult::valid();

        if request.gas_limit < MIN_GAS_LIMIT {
            result.add_error(format!(
                "gas limit {} is below the intrinsic {}",
                request.gas_limit, MIN_GAS_LIMIT
            ));
        }

        match parse_decimal_integer("gas_price", &request.gas_price) {
            Ok(0) => result.add_error("gas_price must be at least 1".to_string()),
            Ok(gas_price) => {
                if let Ok(tip) = parse_decimal_integer("gas_tips", &request.gas_tip) {
                    if tip > gas_price {
                        result.add_warning(format!(
                            "gas_tips {} exceeds gas_price {}; the node may reject the transaction",
                            tip, gas_price
                        ));
                    }
                }
            }
            Err(e) => result.add_error(e.to_string()),
        }

        result
    }
}

impl Default for BasicRequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

//! Utility functions and helpers

use crate::constants::{ADDRESS_LEN, NATIVE_DECIMALS};
use crate::error::{Result, SimulatorError};
use alloy::primitives::{Bytes, U256};
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;
use std::str::FromStr;

// 10^60 native units scaled to wei already exceeds U256
const MAX_NATIVE_INTEGER_DIGITS: i64 = 60;

/// Convert wei to native units (as f64).
///
/// Lossy; only for display, never feed the result back into arithmetic.
pub fn wei_to_eth(wei: U256) -> f64 {
    if wei == U256::ZERO {
        return 0.0;
    }

    let wei_f64: f64 = wei.to_string().parse().unwrap_or(f64::MAX);
    wei_f64 / 1e18
}

/// Convert a decimal native-unit amount (`"3"`, `"0.25"`) to wei.
///
/// Parsing and scaling happen in exact decimal arithmetic; digits below one wei
/// are truncated. An empty string is zero.
pub fn parse_native_amount(field: &str, amount: &str) -> Result<U256> {
    if amount.is_empty() {
        return Ok(U256::ZERO);
    }

    let decimal = BigDecimal::from_str(amount)
        .map_err(|e| SimulatorError::format(field, format!("invalid decimal {:?}: {}", amount, e)))?;
    if decimal.sign() == Sign::NoSign {
        return Ok(U256::ZERO);
    }

    // Bound the exponent before scaling so "1e2000000" fails fast
    let integer_digits = decimal.digits() as i64 - decimal.fractional_digit_count();
    if integer_digits > MAX_NATIVE_INTEGER_DIGITS {
        return Err(SimulatorError::format(
            field,
            format!("amount {:?} out of range", amount),
        ));
    }
    if integer_digits <= -NATIVE_DECIMALS {
        return if decimal.sign() == Sign::Minus {
            Err(SimulatorError::format(field, format!("negative amount {:?}", amount)))
        } else {
            Ok(U256::ZERO)
        };
    }

    let scale = BigDecimal::new(BigInt::from(1), -NATIVE_DECIMALS);

    let (wei, _) = (decimal * scale).with_scale(0).into_bigint_and_exponent();
    if wei.sign() == Sign::Minus {
        return Err(SimulatorError::format(field, format!("negative amount {:?}", amount)));
    }

    U256::from_str_radix(&wei.to_string(), 10)
        .map_err(|e| SimulatorError::format(field, format!("amount {:?} out of range: {}", amount, e)))
}

/// Parse a base-10 integer string such as a fee in wei
pub fn parse_decimal_integer(field: &str, value: &str) -> Result<u128> {
    value
        .parse::<u128>()
        .map_err(|e| SimulatorError::format(field, format!("invalid integer {:?}: {}", value, e)))
}

/// Decode hex call data; both `""` and `"0x"` are empty
pub fn decode_hex_input(field: &str, input: &str) -> Result<Bytes> {
    if input.is_empty() {
        return Ok(Bytes::new());
    }

    alloy::hex::decode(input)
        .map(Bytes::from)
        .map_err(|e| SimulatorError::format(field, format!("invalid hex: {}", e)))
}

/// Validate Ethereum address format
pub fn is_valid_address(address: &str) -> bool {
    if !address.starts_with("0x") {
        return false;
    }

    if address.len() != ADDRESS_LEN {
        return false;
    }

    address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate transaction hash format
pub fn is_valid_tx_hash(hash: &str) -> bool {
    if !hash.starts_with("0x") {
        return false;
    }

    if hash.len() != 66 {
        return false;
    }

    hash[2..].chars().all(|c| c.is_ascii_hexdigit())
}

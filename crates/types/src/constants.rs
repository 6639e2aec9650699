//! Dev-chain fixtures shared by every component

/// Chain id of a hardhat development node; every simulated transaction is signed for it
pub const DEV_CHAIN_ID: u64 = 31337;

/// Balance applied by `hardhat_setBalance` (10,000 native units)
pub const SET_BALANCE_AMOUNT_HEX: &str = "0x21e19e0c9bab2400000";

/// JSON-RPC protocol version tag
pub const JSONRPC_VERSION: &str = "2.0";

/// The only request id this client issues
pub const JSONRPC_ID: u64 = 1;

/// Intrinsic gas of a plain transfer
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// Length of a `0x`-prefixed hex address
pub const ADDRESS_LEN: usize = 42;

/// Decimals of the native token
pub const NATIVE_DECIMALS: i64 = 18;

/// Path of the platform reset endpoint, relative to the platform URL
pub const RESET_PATH: &str = "/v1/reset";

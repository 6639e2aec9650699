//! Shared types for the hardhat simulator SDK
//!
//! This crate contains the domain types used across the simulator
//! components: the transaction request, JSON-RPC envelopes, dev-chain
//! constants, errors, and conversion helpers.

pub mod constants;
pub mod error;
pub mod request;
pub mod rpc;
pub mod utils;

// Re-export commonly used types
pub use constants::*;
pub use error::{ConfigError, Result, SimulatorError, TransportError};
pub use request::*;
pub use rpc::{decode_envelope, DevNodeMethod, RpcEnvelope, RpcErrorObject, RpcRequest};

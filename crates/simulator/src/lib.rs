//! Transaction simulation against a forked hardhat node
//!
//! This crate validates transaction requests, prepares the dev node
//! (impersonation, fork reset, mining to height), signs and broadcasts the
//! transaction, and exposes the chain introspection calls of the SDK.

pub mod engine;
pub mod signing;
pub mod traits;
pub mod validation;

pub use engine::*;
pub use signing::*;
pub use traits::*;
pub use validation::*;

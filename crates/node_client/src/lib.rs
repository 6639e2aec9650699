//! Clients for the hardhat dev node and the platform that hosts it
//!
//! This crate handles HTTP plumbing, the dev-node JSON-RPC control methods,
//! the fork reset endpoint, and standard chain queries, each behind a
//! capability trait so callers can be tested against mocks.

pub mod chain;
pub mod hardhat;
pub mod platform;
pub mod traits;
pub mod transport;

pub use chain::*;
pub use hardhat::*;
pub use platform::*;
pub use traits::*;
pub use transport::*;

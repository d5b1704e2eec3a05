//! Mock transport endpoint.
//!
//! Stands in for the cross-chain messaging layer in tests and local setups:
//! `Send` charges a fee and appends the payload to an outbound packet log, and
//! a trusted relayer moves packets to the destination chain with `Deliver`,
//! which calls `LzReceive` on the receiving contract.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

//! Token Bridge Controller - Cross-Chain CW20 Transfers over a Message Endpoint
//!
//! One instance per chain. Controllers on different chains recognise each
//! other through a per-chain trusted path and exchange transfer payloads via
//! an external endpoint contract.
//!
//! # Outbound Flow
//! 1. User grants the controller a CW20 allowance and calls `BridgeToken`
//!    with the relay fee attached
//! 2. Controller burns (MintBurn) or escrows (LockUnlock) the amount
//! 3. Transfer payload is handed to the endpoint for the trusted remote path
//!
//! # Inbound Flow
//! 1. Endpoint delivers `LzReceive` from an authenticated source
//! 2. Controller credits the recipient through a ledger submessage
//! 3. Any application failure is stored as a payload digest instead of
//!    failing the delivery
//! 4. Anyone may call `RetryMessage` with the original payload later
//!
//! # Security
//! - Sender and source-path authentication on every delivery
//! - At-most-once application per (chain, path, nonce)
//! - Reentrancy lock while a ledger credit is in flight
//! - Admin-authorized upgrades and emergency pause

pub mod contract;
pub mod decimals;
pub mod error;
mod execute;
pub mod guard;
pub mod hash;
pub mod ledger;
pub mod msg;
pub mod payload;
mod query;
pub mod state;
pub mod transport;

pub use crate::error::ContractError;
pub use crate::hash::keccak256;
pub use crate::payload::TransferPayload;

//! Error types for the token bridge controller
//!
//! Outbound and administrative failures abort the whole operation. Inbound
//! application failures never reach the transport as errors: the inbound
//! processor renders them into failed-message records instead (see
//! `execute::inbound`), using the `Display` text below as the recorded reason.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[error("Untrusted source for chain {chain_id}")]
    UntrustedSource { chain_id: u16 },

    #[error("No trusted remote registered for chain {chain_id}")]
    NoTrustedRemote { chain_id: u16 },

    #[error("Reentrant call rejected")]
    Reentrancy,

    // ========================================================================
    // Bridge State Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Token not allowed: {token}")]
    TokenNotAllowed { token: String },

    #[error("Invalid decimals: local {local} is below shared {shared} or out of range")]
    InvalidDecimals { local: u8, shared: u8 },

    // ========================================================================
    // Amount & Funds Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Amount has dust below shared precision: {dust}")]
    AmountHasDust { dust: Uint128 },

    #[error("Amount exceeds the shared-decimal range")]
    AmountOverflow,

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance {
        available: Uint128,
        required: Uint128,
    },

    #[error("Insufficient fee: expected {expected}, got {got}")]
    InsufficientFee { expected: Uint128, got: Uint128 },

    #[error("Unexpected funds: {denom} is not the fee denom")]
    UnexpectedFunds { denom: String },

    #[error("Invalid recipient: {reason}")]
    InvalidRecipient { reason: String },

    // ========================================================================
    // Message Errors
    // ========================================================================

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Message already applied: chain {chain_id} nonce {nonce}")]
    MessageAlreadyApplied { chain_id: u16, nonce: u64 },

    #[error("No stored message for chain {chain_id} nonce {nonce}")]
    NoStoredMessage { chain_id: u16, nonce: u64 },

    #[error("Payload does not match the stored failed message digest")]
    PayloadMismatch,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    // ========================================================================
    // Upgrade Errors
    // ========================================================================

    #[error("Upgrade to version {version} not authorized")]
    UpgradeNotAuthorized { version: String },

    #[error("Invalid contract name: expected {expected}, got {got}")]
    InvalidContractName { expected: String, got: String },
}

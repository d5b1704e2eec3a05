//! State definitions for the token bridge controller
//!
//! Every namespace string below is part of the persisted layout and must stay
//! stable across migrations. New versions may add namespaces, never rename or
//! re-key existing ones.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for whitelist, path registry and upgrade authorization
    pub admin: Addr,
    /// Transport endpoint, the only sender allowed to deliver inbound messages
    pub endpoint: Addr,
    /// Native denom the endpoint charges relay fees in
    pub fee_denom: String,
    /// Precision every payload amount is expressed in
    pub shared_decimals: u8,
    /// Whether outbound bridging and inbound application are suspended
    pub paused: bool,
}

impl Config {
    /// Fails with `Unauthorized` unless `sender` holds the admin role.
    pub fn ensure_admin(&self, sender: &Addr) -> Result<(), ContractError> {
        if *sender != self.admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

/// How the ledger is driven for a whitelisted token
#[cw_serde]
pub enum TokenMode {
    /// Burn on the way out, mint on the way in (controller is the CW20 minter)
    MintBurn,
    /// Escrow in the controller on the way out, release from escrow on the way in
    LockUnlock,
}

impl TokenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenMode::MintBurn => "mint_burn",
            TokenMode::LockUnlock => "lock_unlock",
        }
    }
}

/// Whitelist entry for a local CW20 token
#[cw_serde]
pub struct TokenConfig {
    /// CW20 contract address (also the cross-chain token identifier)
    pub token: String,
    pub mode: TokenMode,
    /// Decimals reported by the CW20 contract when it was first whitelisted
    pub local_decimals: u8,
    /// Only enabled entries are whitelisted
    pub enabled: bool,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_outbound: u64,
    pub total_inbound_applied: u64,
    pub total_inbound_failed: u64,
    pub total_retried: u64,
}

/// Identifies a single inbound delivery.
#[cw_serde]
pub struct MessageKey {
    pub src_chain_id: u16,
    pub src_address: Binary,
    pub nonce: u64,
}

impl MessageKey {
    pub fn new(src_chain_id: u16, src_address: Binary, nonce: u64) -> Self {
        Self {
            src_chain_id,
            src_address,
            nonce,
        }
    }

    /// Borrowed storage key for `FAILED_MESSAGES` and `APPLIED_MESSAGES`.
    pub fn storage_key(&self) -> (u16, &[u8], u64) {
        (self.src_chain_id, self.src_address.as_slice(), self.nonce)
    }
}

/// Application in flight between dispatching the ledger credit and its reply.
#[cw_serde]
pub struct PendingApplication {
    pub key: MessageKey,
    /// keccak256 of the raw payload
    pub digest: [u8; 32],
    pub token: String,
    pub recipient: Addr,
    /// Amount in local decimals
    pub amount: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:token-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound accepted for `shared_decimals` at instantiation
pub const MAX_SHARED_DECIMALS: u8 = 18;

/// Reply id for inbound applications (failure is recorded)
pub const INBOUND_APPLY_REPLY_ID: u64 = 1;

/// Reply id for retried applications (failure reverts the retry)
pub const RETRY_APPLY_REPLY_ID: u64 = 2;

// ============================================================================
// Core State Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Trusted counterpart path per remote chain id
pub const TRUSTED_REMOTES: Map<u16, Binary> = Map::new("trusted_remotes");

/// Token whitelist
/// Key: CW20 contract address, Value: TokenConfig
pub const TOKENS: Map<&str, TokenConfig> = Map::new("tokens");

/// Failed inbound messages
/// Key: (src_chain_id, src_address, nonce), Value: keccak256(payload)
pub const FAILED_MESSAGES: Map<(u16, &[u8], u64), [u8; 32]> = Map::new("failed_messages");

/// Successfully applied inbound messages
/// Key: (src_chain_id, src_address, nonce), Value: block height of application
pub const APPLIED_MESSAGES: Map<(u16, &[u8], u64), u64> = Map::new("applied_messages");

/// Application awaiting its ledger reply
pub const PENDING_APPLICATION: Item<PendingApplication> = Item::new("pending_application");

/// Reentrancy lock, see `guard`
pub const REENTRANCY_LOCK: Item<bool> = Item::new("reentrancy_lock");

/// Contract version the admin has approved as the next logic
pub const AUTHORIZED_UPGRADE: Item<String> = Item::new("authorized_upgrade");

/// Returns the token's whitelist entry if it is currently enabled.
pub fn whitelisted_token(
    storage: &dyn Storage,
    token: &str,
) -> Result<TokenConfig, ContractError> {
    TOKENS
        .may_load(storage, token)?
        .filter(|t| t.enabled)
        .ok_or_else(|| ContractError::TokenNotAllowed {
            token: token.to_string(),
        })
}

//! Message types for the token bridge controller

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::payload::TransferPayload;
use crate::state::TokenMode;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Transport endpoint contract
    pub endpoint: String,
    /// Native denom relay fees are paid in (e.g. "uluna")
    pub fee_denom: String,
    /// Decimal precision used for every payload amount
    pub shared_decimals: u8,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound
    // ========================================================================
    /// Debit `amount` of `token` from the caller and send it to `remote_chain_id`.
    ///
    /// Authorization: Anyone (caller must have granted the controller a CW20
    /// allowance and attach the relay fee in the fee denom)
    BridgeToken {
        remote_chain_id: u16,
        /// Whitelisted CW20 contract address
        token: String,
        /// Amount in local decimals, must convert to shared decimals without dust
        amount: Uint128,
        /// Recipient on the remote chain (defaults to the caller's address)
        recipient: Option<String>,
        /// Opaque relayer parameters forwarded to the endpoint
        adapter_params: Option<Binary>,
    },

    // ========================================================================
    // Inbound
    // ========================================================================
    /// Deliver a message from a remote chain.
    ///
    /// Authorization: Transport endpoint only
    ///
    /// Application failures are recorded for retry instead of failing the
    /// delivery.
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    /// Re-apply a previously failed message.
    ///
    /// Authorization: Anyone (payload must match the stored digest)
    RetryMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    // ========================================================================
    // Administration
    // ========================================================================
    /// Add, enable or disable a token. Decimals are read from the CW20 contract
    /// the first time it is whitelisted.
    ///
    /// Authorization: Admin only
    SetWhitelistToken {
        token: String,
        allowed: bool,
        /// Ledger mode (defaults to MintBurn for new entries)
        mode: Option<TokenMode>,
    },

    /// Register the trusted path for a remote chain. An empty path removes it.
    ///
    /// Authorization: Admin only
    SetTrustedRemote { chain_id: u16, path: Binary },

    /// Authorization: Admin only
    TransferAdmin { new_admin: String },

    /// Approve migration to the code that reports `new_version`.
    ///
    /// Authorization: Admin only
    AuthorizeUpgrade { new_version: String },

    /// Authorization: Admin only
    SetEndpoint { endpoint: String },

    /// Suspend outbound bridging; inbound applications are recorded as failed.
    ///
    /// Authorization: Admin only
    Pause {},

    /// Authorization: Admin only
    Unpause {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    /// Digest of the outstanding failure for a key (32 zero bytes if none)
    #[returns(FailedMessageResponse)]
    FailedMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
    },

    /// Outstanding failures from one source, ordered by nonce
    #[returns(FailedMessagesResponse)]
    FailedMessages {
        src_chain_id: u16,
        src_address: Binary,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(MessageStatusResponse)]
    MessageStatus {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
    },

    #[returns(IsWhitelistedResponse)]
    IsWhitelisted { token: String },

    #[returns(TokenResponse)]
    Token { token: String },

    #[returns(TokensResponse)]
    Tokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Trusted path for a chain (empty if none)
    #[returns(TrustedRemoteResponse)]
    TrustedRemote { chain_id: u16 },

    #[returns(IsTrustedRemoteResponse)]
    IsTrustedRemote { chain_id: u16, path: Binary },

    #[returns(TrustedRemotesResponse)]
    TrustedRemotes {
        start_after: Option<u16>,
        limit: Option<u32>,
    },

    #[returns(AuthorizedUpgradeResponse)]
    AuthorizedUpgrade {},

    /// Encode a transfer payload exactly as the controller would send it
    #[returns(PayloadResponse)]
    EncodePayload {
        token: String,
        recipient: String,
        amount: u64,
    },

    #[returns(TransferPayload)]
    DecodePayload { payload: Binary },

    #[returns(PayloadHashResponse)]
    PayloadHash { payload: Binary },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub endpoint: Addr,
    pub fee_denom: String,
    pub shared_decimals: u8,
    pub paused: bool,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_outbound: u64,
    pub total_inbound_applied: u64,
    pub total_inbound_failed: u64,
    pub total_retried: u64,
}

#[cw_serde]
pub struct FailedMessageResponse {
    /// keccak256 of the failed payload, 32 zero bytes if nothing is outstanding
    pub digest: Binary,
}

#[cw_serde]
pub struct FailedMessageEntry {
    pub nonce: u64,
    pub digest: Binary,
}

#[cw_serde]
pub struct FailedMessagesResponse {
    pub messages: Vec<FailedMessageEntry>,
}

#[cw_serde]
pub enum MessageStatus {
    Unseen,
    Applied { height: u64 },
    Failed { digest: Binary },
}

#[cw_serde]
pub struct MessageStatusResponse {
    pub status: MessageStatus,
}

#[cw_serde]
pub struct IsWhitelistedResponse {
    pub whitelisted: bool,
}

#[cw_serde]
pub struct TokenResponse {
    pub token: String,
    pub mode: TokenMode,
    pub local_decimals: u8,
    pub enabled: bool,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<TokenResponse>,
}

#[cw_serde]
pub struct TrustedRemoteResponse {
    pub chain_id: u16,
    pub path: Binary,
}

#[cw_serde]
pub struct IsTrustedRemoteResponse {
    pub trusted: bool,
}

#[cw_serde]
pub struct TrustedRemotesResponse {
    pub remotes: Vec<TrustedRemoteResponse>,
}

#[cw_serde]
pub struct AuthorizedUpgradeResponse {
    pub version: Option<String>,
}

#[cw_serde]
pub struct PayloadResponse {
    pub payload: Binary,
    pub hash: Binary,
}

#[cw_serde]
pub struct PayloadHashResponse {
    pub hash: Binary,
}

/// Returned as response data from `BridgeToken`
#[cw_serde]
pub struct BridgeReceipt {
    pub remote_chain_id: u16,
    pub destination: Binary,
    pub payload: Binary,
    pub payload_hash: Binary,
    /// Amount carried in the payload (shared decimals)
    pub shared_amount: u64,
    pub fee_paid: Uint128,
}

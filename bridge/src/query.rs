//! Query handlers for the token bridge controller.
//!
//! This module contains all query message handlers for retrieving contract state.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::hash::{keccak256, ZERO_DIGEST};
use crate::msg::{
    AuthorizedUpgradeResponse, ConfigResponse, FailedMessageEntry, FailedMessageResponse,
    FailedMessagesResponse, IsTrustedRemoteResponse, IsWhitelistedResponse, MessageStatus,
    MessageStatusResponse, PayloadHashResponse, PayloadResponse, StatsResponse, TokenResponse,
    TokensResponse, TrustedRemoteResponse, TrustedRemotesResponse,
};
use crate::payload::TransferPayload;
use crate::state::{
    MessageKey, TokenConfig, APPLIED_MESSAGES, AUTHORIZED_UPGRADE, CONFIG, FAILED_MESSAGES,
    STATS, TOKENS, TRUSTED_REMOTES,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        endpoint: config.endpoint,
        fee_denom: config.fee_denom,
        shared_decimals: config.shared_decimals,
        paused: config.paused,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_outbound: stats.total_outbound,
        total_inbound_applied: stats.total_inbound_applied,
        total_inbound_failed: stats.total_inbound_failed,
        total_retried: stats.total_retried,
    })
}

pub fn query_authorized_upgrade(deps: Deps) -> StdResult<AuthorizedUpgradeResponse> {
    Ok(AuthorizedUpgradeResponse {
        version: AUTHORIZED_UPGRADE.may_load(deps.storage)?,
    })
}

// ============================================================================
// Failed Message Queries
// ============================================================================

/// Digest of the outstanding failure for a key, 32 zero bytes if there is none.
pub fn query_failed_message(
    deps: Deps,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
) -> StdResult<FailedMessageResponse> {
    let key = MessageKey::new(src_chain_id, src_address, nonce);
    let digest = FAILED_MESSAGES
        .may_load(deps.storage, key.storage_key())?
        .unwrap_or(ZERO_DIGEST);
    Ok(FailedMessageResponse {
        digest: Binary::from(digest.to_vec()),
    })
}

/// Outstanding failures from one source, ordered by nonce.
pub fn query_failed_messages(
    deps: Deps,
    src_chain_id: u16,
    src_address: Binary,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<FailedMessagesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let messages = FAILED_MESSAGES
        .prefix((src_chain_id, src_address.as_slice()))
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (nonce, digest) = item?;
            Ok(FailedMessageEntry {
                nonce,
                digest: Binary::from(digest.to_vec()),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(FailedMessagesResponse { messages })
}

pub fn query_message_status(
    deps: Deps,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
) -> StdResult<MessageStatusResponse> {
    let key = MessageKey::new(src_chain_id, src_address, nonce);

    let status = if let Some(height) = APPLIED_MESSAGES.may_load(deps.storage, key.storage_key())?
    {
        MessageStatus::Applied { height }
    } else if let Some(digest) = FAILED_MESSAGES.may_load(deps.storage, key.storage_key())? {
        MessageStatus::Failed {
            digest: Binary::from(digest.to_vec()),
        }
    } else {
        MessageStatus::Unseen
    };

    Ok(MessageStatusResponse { status })
}

// ============================================================================
// Token Queries
// ============================================================================

fn token_response(token_config: TokenConfig) -> TokenResponse {
    TokenResponse {
        token: token_config.token,
        mode: token_config.mode,
        local_decimals: token_config.local_decimals,
        enabled: token_config.enabled,
    }
}

pub fn query_is_whitelisted(deps: Deps, token: String) -> StdResult<IsWhitelistedResponse> {
    let whitelisted = TOKENS
        .may_load(deps.storage, &token)?
        .map(|t| t.enabled)
        .unwrap_or(false);
    Ok(IsWhitelistedResponse { whitelisted })
}

pub fn query_token(deps: Deps, token: String) -> StdResult<TokenResponse> {
    let token_config = TOKENS.load(deps.storage, &token)?;
    Ok(token_response(token_config))
}

/// Query paginated list of whitelist entries, disabled ones included.
pub fn query_tokens(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens = TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, t)| token_response(t)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}

// ============================================================================
// Trusted Remote Queries
// ============================================================================

/// Trusted path for a chain, empty if none is registered.
pub fn query_trusted_remote(deps: Deps, chain_id: u16) -> StdResult<TrustedRemoteResponse> {
    let path = TRUSTED_REMOTES
        .may_load(deps.storage, chain_id)?
        .unwrap_or_default();
    Ok(TrustedRemoteResponse { chain_id, path })
}

pub fn query_is_trusted_remote(
    deps: Deps,
    chain_id: u16,
    path: Binary,
) -> StdResult<IsTrustedRemoteResponse> {
    let trusted = match TRUSTED_REMOTES.may_load(deps.storage, chain_id)? {
        Some(stored) => !path.is_empty() && stored == path,
        None => false,
    };
    Ok(IsTrustedRemoteResponse { trusted })
}

pub fn query_trusted_remotes(
    deps: Deps,
    start_after: Option<u16>,
    limit: Option<u32>,
) -> StdResult<TrustedRemotesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let remotes = TRUSTED_REMOTES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (chain_id, path) = item?;
            Ok(TrustedRemoteResponse { chain_id, path })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TrustedRemotesResponse { remotes })
}

// ============================================================================
// Payload Helpers
// ============================================================================

/// Encode a transfer payload exactly as `BridgeToken` would.
pub fn query_encode_payload(
    token: String,
    recipient: String,
    amount: u64,
) -> StdResult<PayloadResponse> {
    let payload = TransferPayload {
        token,
        recipient,
        amount,
    }
    .encode()
    .map_err(|e| StdError::generic_err(e.to_string()))?;
    let hash = keccak256(&payload);

    Ok(PayloadResponse {
        payload: Binary::from(payload),
        hash: Binary::from(hash.to_vec()),
    })
}

pub fn query_decode_payload(payload: Binary) -> StdResult<TransferPayload> {
    TransferPayload::decode(payload.as_slice()).map_err(|e| StdError::generic_err(e.to_string()))
}

pub fn query_payload_hash(payload: Binary) -> PayloadHashResponse {
    PayloadHashResponse {
        hash: Binary::from(keccak256(payload.as_slice()).to_vec()),
    }
}

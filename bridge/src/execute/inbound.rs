//! Inbound message handler (LzReceive) and its ledger reply.
//!
//! Authentication failures reject the delivery outright. Everything after
//! authentication is an application attempt whose failure is recorded as a
//! failed message instead of being surfaced to the transport:
//! 1. Synchronous failures (decode, whitelist miss, pause, bad recipient,
//!    decimal overflow) are recorded before anything is dispatched.
//! 2. Ledger failures come back through the `INBOUND_APPLY_REPLY_ID` reply,
//!    where the ledger's own state changes have already been rolled back.

use cosmwasm_std::{
    Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Storage, SubMsg,
    SubMsgResult, Uint128,
};

use crate::decimals::to_local;
use crate::error::ContractError;
use crate::guard;
use crate::hash::{bytes32_to_hex, keccak256, path_to_hex};
use crate::ledger;
use crate::payload::TransferPayload;
use crate::state::{
    whitelisted_token, Config, MessageKey, PendingApplication, APPLIED_MESSAGES, CONFIG,
    FAILED_MESSAGES, INBOUND_APPLY_REPLY_ID, PENDING_APPLICATION, STATS, TRUSTED_REMOTES,
};

/// A ledger credit ready to be dispatched.
pub(crate) struct Credit {
    pub token: String,
    pub recipient: Addr,
    pub amount: Uint128,
    pub msg: CosmosMsg,
}

/// Result of the synchronous part of an inbound application.
pub(crate) enum ApplyOutcome {
    /// Ledger credit dispatched; the reply settles the key.
    Dispatched(SubMsg),
    /// Application failed before reaching the ledger; the failure is stored.
    Recorded { digest: [u8; 32], reason: String },
}

/// Validate a payload against current state and build the ledger credit.
///
/// Shared by first delivery and retry. Any error here is an application
/// failure: recorded on delivery, fatal on retry.
pub(crate) fn prepare_application(
    deps: Deps,
    config: &Config,
    payload: &[u8],
) -> Result<Credit, ContractError> {
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let transfer = TransferPayload::decode(payload)?;
    let token_config = whitelisted_token(deps.storage, &transfer.token)?;

    if transfer.amount == 0 {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let recipient = deps
        .api
        .addr_validate(&transfer.recipient)
        .map_err(|e| ContractError::InvalidRecipient {
            reason: e.to_string(),
        })?;
    let amount = to_local(
        transfer.amount,
        token_config.local_decimals,
        config.shared_decimals,
    )?;
    let msg = ledger::credit_msg(&token_config.mode, &transfer.token, &recipient, amount)?;

    Ok(Credit {
        token: transfer.token,
        recipient,
        amount,
        msg,
    })
}

/// Fails unless `src_address` is the trusted path registered for `src_chain_id`.
pub(crate) fn ensure_trusted_source(
    storage: &dyn Storage,
    src_chain_id: u16,
    src_address: &Binary,
) -> Result<(), ContractError> {
    match TRUSTED_REMOTES.may_load(storage, src_chain_id)? {
        Some(path) if !path.is_empty() && path == *src_address => Ok(()),
        _ => Err(ContractError::UntrustedSource {
            chain_id: src_chain_id,
        }),
    }
}

fn record_failure(
    storage: &mut dyn Storage,
    key: &MessageKey,
    digest: &[u8; 32],
) -> Result<(), ContractError> {
    FAILED_MESSAGES.save(storage, key.storage_key(), digest)?;
    let mut stats = STATS.load(storage)?;
    stats.total_inbound_failed += 1;
    STATS.save(storage, &stats)?;
    Ok(())
}

fn failure_event(key: &MessageKey, digest: &[u8; 32], reason: &str) -> Event {
    Event::new("message_failed")
        .add_attribute("src_chain_id", key.src_chain_id.to_string())
        .add_attribute("src_address", path_to_hex(key.src_address.as_slice()))
        .add_attribute("nonce", key.nonce.to_string())
        .add_attribute("digest", bytes32_to_hex(digest))
        .add_attribute("reason", reason)
}

/// Attempt to apply a freshly delivered message.
fn apply_inbound(
    deps: DepsMut,
    config: &Config,
    key: &MessageKey,
    payload: &[u8],
    digest: [u8; 32],
) -> Result<ApplyOutcome, ContractError> {
    match prepare_application(deps.as_ref(), config, payload) {
        Ok(credit) => {
            guard::enter(deps.storage)?;
            PENDING_APPLICATION.save(
                deps.storage,
                &PendingApplication {
                    key: key.clone(),
                    digest,
                    token: credit.token,
                    recipient: credit.recipient,
                    amount: credit.amount,
                },
            )?;
            Ok(ApplyOutcome::Dispatched(SubMsg::reply_always(
                credit.msg,
                INBOUND_APPLY_REPLY_ID,
            )))
        }
        Err(err) => {
            record_failure(deps.storage, key, &digest)?;
            Ok(ApplyOutcome::Recorded {
                digest,
                reason: err.to_string(),
            })
        }
    }
}

/// Transport delivery entry point.
pub fn execute_lz_receive(
    deps: DepsMut,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.endpoint {
        return Err(ContractError::Unauthorized);
    }
    ensure_trusted_source(deps.storage, src_chain_id, &src_address)?;

    let key = MessageKey::new(src_chain_id, src_address, nonce);
    if APPLIED_MESSAGES.has(deps.storage, key.storage_key()) {
        return Err(ContractError::MessageAlreadyApplied {
            chain_id: src_chain_id,
            nonce,
        });
    }

    let digest = keccak256(payload.as_slice());
    let base = Response::new()
        .add_attribute("method", "lz_receive")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string());

    // Redelivery of a key with an outstanding failure never re-applies; only
    // the retry path can settle it.
    if let Some(stored) = FAILED_MESSAGES.may_load(deps.storage, key.storage_key())? {
        if stored == digest {
            return Ok(base.add_attribute("status", "already_recorded"));
        }
        FAILED_MESSAGES.save(deps.storage, key.storage_key(), &digest)?;
        let event = Event::new("digest_refreshed")
            .add_attribute("src_chain_id", src_chain_id.to_string())
            .add_attribute("src_address", path_to_hex(key.src_address.as_slice()))
            .add_attribute("nonce", nonce.to_string())
            .add_attribute("previous_digest", bytes32_to_hex(&stored))
            .add_attribute("digest", bytes32_to_hex(&digest));
        return Ok(base
            .add_event(event)
            .add_attribute("status", "digest_refreshed"));
    }

    match apply_inbound(deps, &config, &key, payload.as_slice(), digest)? {
        ApplyOutcome::Dispatched(submsg) => Ok(base
            .add_submessage(submsg)
            .add_attribute("status", "dispatched")),
        ApplyOutcome::Recorded { digest, reason } => Ok(base
            .add_event(failure_event(&key, &digest, &reason))
            .add_attribute("status", "recorded")),
    }
}

/// Settle an inbound application once the ledger has answered.
pub fn reply_inbound_apply(
    deps: DepsMut,
    env: Env,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let pending = PENDING_APPLICATION.load(deps.storage)?;
    PENDING_APPLICATION.remove(deps.storage);
    guard::exit(deps.storage);

    let key = &pending.key;
    let base = Response::new()
        .add_attribute("method", "reply_inbound_apply")
        .add_attribute("src_chain_id", key.src_chain_id.to_string())
        .add_attribute("nonce", key.nonce.to_string());

    match result {
        SubMsgResult::Ok(_) => {
            APPLIED_MESSAGES.save(deps.storage, key.storage_key(), &env.block.height)?;
            let mut stats = STATS.load(deps.storage)?;
            stats.total_inbound_applied += 1;
            STATS.save(deps.storage, &stats)?;

            let event = Event::new("message_applied")
                .add_attribute("src_chain_id", key.src_chain_id.to_string())
                .add_attribute("src_address", path_to_hex(key.src_address.as_slice()))
                .add_attribute("nonce", key.nonce.to_string())
                .add_attribute("token", &pending.token)
                .add_attribute("recipient", pending.recipient.to_string())
                .add_attribute("amount", pending.amount.to_string());
            Ok(base.add_event(event).add_attribute("status", "applied"))
        }
        SubMsgResult::Err(reason) => {
            deps.api.debug(&format!(
                "inbound application failed: chain {} nonce {}: {}",
                key.src_chain_id, key.nonce, reason
            ));
            record_failure(deps.storage, key, &pending.digest)?;
            Ok(base
                .add_event(failure_event(key, &pending.digest, &reason))
                .add_attribute("status", "recorded"))
        }
    }
}

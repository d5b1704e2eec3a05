//! Retry of failed inbound messages.
//!
//! Unlike first delivery, a retry is all-or-nothing: the ledger credit is sent
//! with a success-only reply, so any failure reverts the whole transaction and
//! the failure record stays exactly as it was.

use cosmwasm_std::{Binary, DepsMut, Env, Event, MessageInfo, Response, SubMsg};

use crate::error::ContractError;
use crate::guard;
use crate::hash::{bytes32_to_hex, keccak256, path_to_hex};
use crate::state::{
    MessageKey, PendingApplication, APPLIED_MESSAGES, CONFIG, FAILED_MESSAGES,
    PENDING_APPLICATION, RETRY_APPLY_REPLY_ID, STATS,
};

use super::inbound::prepare_application;

/// Re-apply the stored failure for `(src_chain_id, src_address, nonce)`.
///
/// Anyone may call this; the supplied payload must hash to the stored digest.
pub fn execute_retry_message(
    deps: DepsMut,
    _info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let key = MessageKey::new(src_chain_id, src_address, nonce);

    let stored = FAILED_MESSAGES
        .may_load(deps.storage, key.storage_key())?
        .ok_or(ContractError::NoStoredMessage {
            chain_id: src_chain_id,
            nonce,
        })?;

    let digest = keccak256(payload.as_slice());
    if digest != stored {
        return Err(ContractError::PayloadMismatch);
    }

    let config = CONFIG.load(deps.storage)?;
    let credit = prepare_application(deps.as_ref(), &config, payload.as_slice())?;

    guard::enter(deps.storage)?;
    PENDING_APPLICATION.save(
        deps.storage,
        &PendingApplication {
            key,
            digest,
            token: credit.token,
            recipient: credit.recipient,
            amount: credit.amount,
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(credit.msg, RETRY_APPLY_REPLY_ID))
        .add_attribute("method", "retry_message")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string()))
}

/// Clear the failure record once the retried credit has gone through.
pub fn reply_retry_apply(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let pending = PENDING_APPLICATION.load(deps.storage)?;
    PENDING_APPLICATION.remove(deps.storage);
    guard::exit(deps.storage);

    let key = &pending.key;
    FAILED_MESSAGES.remove(deps.storage, key.storage_key());
    APPLIED_MESSAGES.save(deps.storage, key.storage_key(), &env.block.height)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_retried += 1;
    STATS.save(deps.storage, &stats)?;

    let event = Event::new("retry_succeeded")
        .add_attribute("src_chain_id", key.src_chain_id.to_string())
        .add_attribute("src_address", path_to_hex(key.src_address.as_slice()))
        .add_attribute("nonce", key.nonce.to_string())
        .add_attribute("digest", bytes32_to_hex(&pending.digest))
        .add_attribute("token", &pending.token)
        .add_attribute("recipient", pending.recipient.to_string())
        .add_attribute("amount", pending.amount.to_string());

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "reply_retry_apply"))
}

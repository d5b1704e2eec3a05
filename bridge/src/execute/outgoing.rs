//! Outbound transfer handler.
//!
//! The debit and the endpoint send are dispatched as messages of the same
//! transaction, so a failing send reverts the debit and vice versa.

use cosmwasm_std::{
    to_json_binary, Binary, Coin, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};

use crate::decimals::to_shared;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, keccak256, path_to_hex};
use crate::ledger;
use crate::msg::BridgeReceipt;
use crate::payload::TransferPayload;
use crate::state::{whitelisted_token, CONFIG, STATS, TRUSTED_REMOTES};
use crate::transport;

/// Lock or burn `amount` of `token` from the caller and send a transfer
/// payload to the trusted path of `remote_chain_id`.
#[allow(clippy::too_many_arguments)]
pub fn execute_bridge_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    remote_chain_id: u16,
    token: String,
    amount: Uint128,
    recipient: Option<String>,
    adapter_params: Option<Binary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let token_config = whitelisted_token(deps.storage, &token)?;

    let destination = TRUSTED_REMOTES
        .may_load(deps.storage, remote_chain_id)?
        .ok_or(ContractError::NoTrustedRemote {
            chain_id: remote_chain_id,
        })?;

    let shared_amount = to_shared(amount, token_config.local_decimals, config.shared_decimals)?;

    let available = ledger::balance_of(&deps.querier, &token, &info.sender)?;
    if available < amount {
        return Err(ContractError::InsufficientBalance {
            available,
            required: amount,
        });
    }

    let recipient = recipient.unwrap_or_else(|| info.sender.to_string());
    if recipient.trim().is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "Recipient must not be empty".to_string(),
        });
    }

    let payload = TransferPayload {
        token: token.clone(),
        recipient: recipient.clone(),
        amount: shared_amount,
    }
    .encode()?;
    let payload_hash = keccak256(&payload);

    // Fee check
    let adapter_params = adapter_params.unwrap_or_default();
    let expected_fee = transport::estimate_fee(
        &deps.querier,
        &config.endpoint,
        remote_chain_id,
        &payload,
        &adapter_params,
    )?;

    let mut fee_paid = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != config.fee_denom {
            return Err(ContractError::UnexpectedFunds {
                denom: coin.denom.clone(),
            });
        }
        fee_paid += coin.amount;
    }
    if fee_paid < expected_fee {
        return Err(ContractError::InsufficientFee {
            expected: expected_fee,
            got: fee_paid,
        });
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.total_outbound += 1;
    STATS.save(deps.storage, &stats)?;

    let debit = ledger::debit_msg(
        &token_config.mode,
        &token,
        &info.sender,
        &env.contract.address,
        amount,
    )?;
    let fee = (!fee_paid.is_zero()).then(|| Coin {
        denom: config.fee_denom.clone(),
        amount: fee_paid,
    });
    let send = transport::send_msg(
        &config.endpoint,
        remote_chain_id,
        destination.clone(),
        payload.clone(),
        &info.sender,
        adapter_params,
        fee,
    )?;

    let receipt = BridgeReceipt {
        remote_chain_id,
        destination: destination.clone(),
        payload: Binary::from(payload),
        payload_hash: Binary::from(payload_hash.to_vec()),
        shared_amount,
        fee_paid,
    };

    let event = Event::new("bridge_token")
        .add_attribute("remote_chain_id", remote_chain_id.to_string())
        .add_attribute("destination", path_to_hex(destination.as_slice()))
        .add_attribute("token", &token)
        .add_attribute("mode", token_config.mode.as_str())
        .add_attribute("sender", info.sender.to_string())
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("shared_amount", shared_amount.to_string())
        .add_attribute("payload_hash", bytes32_to_hex(&payload_hash))
        .add_attribute("fee_paid", fee_paid.to_string());

    Ok(Response::new()
        .add_message(debit)
        .add_message(send)
        .add_event(event)
        .set_data(to_json_binary(&receipt)?)
        .add_attribute("method", "bridge_token"))
}

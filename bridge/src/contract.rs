//! Token bridge controller - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{
    execute_authorize_upgrade, execute_bridge_token, execute_lz_receive, execute_pause,
    execute_retry_message, execute_set_endpoint, execute_set_trusted_remote,
    execute_set_whitelist_token, execute_transfer_admin, execute_unpause, reply_inbound_apply,
    reply_retry_apply,
};
use crate::guard;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_authorized_upgrade, query_config, query_decode_payload, query_encode_payload,
    query_failed_message, query_failed_messages, query_is_trusted_remote, query_is_whitelisted,
    query_message_status, query_payload_hash, query_stats, query_token, query_tokens,
    query_trusted_remote, query_trusted_remotes,
};
use crate::state::{
    Config, Stats, AUTHORIZED_UPGRADE, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    INBOUND_APPLY_REPLY_ID, MAX_SHARED_DECIMALS, RETRY_APPLY_REPLY_ID, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let endpoint = deps.api.addr_validate(&msg.endpoint)?;

    if msg.shared_decimals > MAX_SHARED_DECIMALS {
        return Err(ContractError::InvalidDecimals {
            local: MAX_SHARED_DECIMALS,
            shared: msg.shared_decimals,
        });
    }
    if msg.fee_denom.trim().is_empty() {
        return Err(StdError::generic_err("fee_denom must not be empty").into());
    }

    let config = Config {
        admin,
        endpoint,
        fee_denom: msg.fee_denom,
        shared_decimals: msg.shared_decimals,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("endpoint", config.endpoint)
        .add_attribute("shared_decimals", config.shared_decimals.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    // Nothing may run while a ledger credit is in flight
    guard::ensure_unlocked(deps.storage)?;

    match msg {
        // Outbound
        ExecuteMsg::BridgeToken {
            remote_chain_id,
            token,
            amount,
            recipient,
            adapter_params,
        } => execute_bridge_token(
            deps,
            env,
            info,
            remote_chain_id,
            token,
            amount,
            recipient,
            adapter_params,
        ),

        // Inbound
        ExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_lz_receive(deps, info, src_chain_id, src_address, nonce, payload),
        ExecuteMsg::RetryMessage {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_retry_message(deps, info, src_chain_id, src_address, nonce, payload),

        // Configuration
        ExecuteMsg::SetWhitelistToken {
            token,
            allowed,
            mode,
        } => execute_set_whitelist_token(deps, info, token, allowed, mode),
        ExecuteMsg::SetTrustedRemote { chain_id, path } => {
            execute_set_trusted_remote(deps, info, chain_id, path)
        }
        ExecuteMsg::SetEndpoint { endpoint } => execute_set_endpoint(deps, info, endpoint),

        // Admin operations
        ExecuteMsg::TransferAdmin { new_admin } => execute_transfer_admin(deps, info, new_admin),
        ExecuteMsg::AuthorizeUpgrade { new_version } => {
            execute_authorize_upgrade(deps, info, new_version)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INBOUND_APPLY_REPLY_ID => reply_inbound_apply(deps, env, msg.result),
        RETRY_APPLY_REPLY_ID => reply_retry_apply(deps, env),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),

        // Failed messages
        QueryMsg::FailedMessage {
            src_chain_id,
            src_address,
            nonce,
        } => to_json_binary(&query_failed_message(
            deps,
            src_chain_id,
            src_address,
            nonce,
        )?),
        QueryMsg::FailedMessages {
            src_chain_id,
            src_address,
            start_after,
            limit,
        } => to_json_binary(&query_failed_messages(
            deps,
            src_chain_id,
            src_address,
            start_after,
            limit,
        )?),
        QueryMsg::MessageStatus {
            src_chain_id,
            src_address,
            nonce,
        } => to_json_binary(&query_message_status(
            deps,
            src_chain_id,
            src_address,
            nonce,
        )?),

        // Whitelist
        QueryMsg::IsWhitelisted { token } => to_json_binary(&query_is_whitelisted(deps, token)?),
        QueryMsg::Token { token } => to_json_binary(&query_token(deps, token)?),
        QueryMsg::Tokens { start_after, limit } => {
            to_json_binary(&query_tokens(deps, start_after, limit)?)
        }

        // Trusted remotes
        QueryMsg::TrustedRemote { chain_id } => {
            to_json_binary(&query_trusted_remote(deps, chain_id)?)
        }
        QueryMsg::IsTrustedRemote { chain_id, path } => {
            to_json_binary(&query_is_trusted_remote(deps, chain_id, path)?)
        }
        QueryMsg::TrustedRemotes { start_after, limit } => {
            to_json_binary(&query_trusted_remotes(deps, start_after, limit)?)
        }

        QueryMsg::AuthorizedUpgrade {} => to_json_binary(&query_authorized_upgrade(deps)?),

        // Payload helpers
        QueryMsg::EncodePayload {
            token,
            recipient,
            amount,
        } => to_json_binary(&query_encode_payload(token, recipient, amount)?),
        QueryMsg::DecodePayload { payload } => to_json_binary(&query_decode_payload(payload)?),
        QueryMsg::PayloadHash { payload } => to_json_binary(&query_payload_hash(payload)),
    }
}

// ============================================================================
// Migrate
// ============================================================================

/// Swap in new logic. Only the version the admin authorized is accepted, and
/// the authorization is consumed.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidContractName {
            expected: CONTRACT_NAME.to_string(),
            got: stored.contract,
        });
    }

    match AUTHORIZED_UPGRADE.may_load(deps.storage)? {
        Some(version) if version == CONTRACT_VERSION => {}
        _ => {
            return Err(ContractError::UpgradeNotAuthorized {
                version: CONTRACT_VERSION.to_string(),
            })
        }
    }
    AUTHORIZED_UPGRADE.remove(deps.storage);

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("previous_version", stored.version)
        .add_attribute("version", CONTRACT_VERSION))
}

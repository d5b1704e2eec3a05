//! Configuration management handlers.
//!
//! This module handles:
//! - Token whitelist (add/enable/disable)
//! - Trusted remote paths (set/remove)
//! - Transport endpoint

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response};

use crate::decimals::conversion_rate;
use crate::error::ContractError;
use crate::hash::path_to_hex;
use crate::ledger;
use crate::state::{TokenConfig, TokenMode, CONFIG, TOKENS, TRUSTED_REMOTES};

// ============================================================================
// Token Whitelist
// ============================================================================

/// Add, re-enable or disable a token.
///
/// A new entry reads its decimals from the CW20 contract once; the value is
/// never refreshed afterwards. Disabling keeps the entry so re-enabling
/// restores the same decimals.
pub fn execute_set_whitelist_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    allowed: bool,
    mode: Option<TokenMode>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    let token = deps.api.addr_validate(&token)?.to_string();
    let existing = TOKENS.may_load(deps.storage, &token)?;

    let token_config = match (existing, allowed) {
        (Some(mut entry), _) => {
            entry.enabled = allowed;
            if let Some(mode) = mode {
                entry.mode = mode;
            }
            entry
        }
        (None, true) => {
            let local_decimals = ledger::token_decimals(&deps.querier, &token)?;
            conversion_rate(local_decimals, config.shared_decimals)?;
            TokenConfig {
                token: token.clone(),
                mode: mode.unwrap_or(TokenMode::MintBurn),
                local_decimals,
                enabled: true,
            }
        }
        (None, false) => {
            return Ok(Response::new()
                .add_attribute("method", "set_whitelist_token")
                .add_attribute("token", token)
                .add_attribute("allowed", "false"));
        }
    };
    TOKENS.save(deps.storage, &token, &token_config)?;

    Ok(Response::new()
        .add_attribute("method", "set_whitelist_token")
        .add_attribute("token", token)
        .add_attribute("allowed", allowed.to_string())
        .add_attribute("mode", token_config.mode.as_str())
        .add_attribute("local_decimals", token_config.local_decimals.to_string()))
}

// ============================================================================
// Trusted Remotes
// ============================================================================

/// Register the counterpart path for `chain_id`; an empty path removes it.
pub fn execute_set_trusted_remote(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    path: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    if path.is_empty() {
        TRUSTED_REMOTES.remove(deps.storage, chain_id);
    } else {
        TRUSTED_REMOTES.save(deps.storage, chain_id, &path)?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_trusted_remote")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("path", path_to_hex(path.as_slice())))
}

// ============================================================================
// Endpoint
// ============================================================================

pub fn execute_set_endpoint(
    deps: DepsMut,
    info: MessageInfo,
    endpoint: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    config.endpoint = deps.api.addr_validate(&endpoint)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_endpoint")
        .add_attribute("endpoint", endpoint))
}

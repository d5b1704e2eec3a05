//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause contract
//! - Admin transfer
//! - Upgrade authorization (consumed by `migrate`)

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{AUTHORIZED_UPGRADE, CONFIG};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the contract (stops outbound transfers and inbound application).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "pause"))
}

/// Unpause the contract.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "unpause"))
}

// ============================================================================
// Admin Transfer
// ============================================================================

/// Hand the admin role to `new_admin`, effective immediately.
pub fn execute_transfer_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    let new_admin_addr = deps.api.addr_validate(&new_admin)?;
    let previous = std::mem::replace(&mut config.admin, new_admin_addr);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_admin")
        .add_attribute("previous_admin", previous.to_string())
        .add_attribute("new_admin", config.admin.to_string()))
}

// ============================================================================
// Upgrade Authorization
// ============================================================================

/// Approve migrating to code that reports `new_version`.
///
/// Replaces any earlier authorization that has not been consumed yet.
pub fn execute_authorize_upgrade(
    deps: DepsMut,
    info: MessageInfo,
    new_version: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    config.ensure_admin(&info.sender)?;

    if new_version.trim().is_empty() {
        return Err(ContractError::UpgradeNotAuthorized {
            version: new_version,
        });
    }
    AUTHORIZED_UPGRADE.save(deps.storage, &new_version)?;

    Ok(Response::new()
        .add_attribute("method", "authorize_upgrade")
        .add_attribute("new_version", new_version))
}

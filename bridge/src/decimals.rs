//! Local ↔ shared decimal conversion
//!
//! Payload amounts are always expressed in the controller's shared decimals so
//! chains with different token precisions agree on the value being moved.
//! Outbound amounts must convert exactly: dust below shared precision is
//! rejected rather than silently kept, so the caller is debited exactly what
//! they asked for.

use cosmwasm_std::Uint128;

use crate::error::ContractError;

/// `10^(local - shared)`, the number of local units per shared unit.
pub fn conversion_rate(local_decimals: u8, shared_decimals: u8) -> Result<Uint128, ContractError> {
    let invalid = || ContractError::InvalidDecimals {
        local: local_decimals,
        shared: shared_decimals,
    };
    let exponent = local_decimals
        .checked_sub(shared_decimals)
        .ok_or_else(invalid)?;
    10u128
        .checked_pow(exponent as u32)
        .map(Uint128::new)
        .ok_or_else(invalid)
}

/// Convert a local amount to shared decimals.
pub fn to_shared(
    amount: Uint128,
    local_decimals: u8,
    shared_decimals: u8,
) -> Result<u64, ContractError> {
    // rate is a power of ten, never zero
    let rate = conversion_rate(local_decimals, shared_decimals)?.u128();
    let dust = amount.u128() % rate;
    if dust != 0 {
        return Err(ContractError::AmountHasDust {
            dust: Uint128::new(dust),
        });
    }
    u64::try_from(amount.u128() / rate).map_err(|_| ContractError::AmountOverflow)
}

/// Convert a shared amount back to local decimals.
pub fn to_local(
    amount: u64,
    local_decimals: u8,
    shared_decimals: u8,
) -> Result<Uint128, ContractError> {
    let rate = conversion_rate(local_decimals, shared_decimals)?;
    Uint128::from(amount)
        .checked_mul(rate)
        .map_err(|_| ContractError::AmountOverflow)
}

//! Reentrancy guard
//!
//! Inbound and retried applications call out to the ledger mid-operation. The
//! lock is taken right before the ledger credit is dispatched and released in
//! the reply, so a ledger contract calling back into the controller observes a
//! held lock and is rejected. If the transaction fails anywhere the storage
//! write is rolled back with it, which releases the lock on every error path.

use cosmwasm_std::{StdResult, Storage};

use crate::error::ContractError;
use crate::state::REENTRANCY_LOCK;

pub fn is_locked(storage: &dyn Storage) -> StdResult<bool> {
    Ok(REENTRANCY_LOCK.may_load(storage)?.unwrap_or(false))
}

/// Fails with `Reentrancy` while an application is in flight.
pub fn ensure_unlocked(storage: &dyn Storage) -> Result<(), ContractError> {
    if is_locked(storage)? {
        return Err(ContractError::Reentrancy);
    }
    Ok(())
}

/// Take the lock.
pub fn enter(storage: &mut dyn Storage) -> Result<(), ContractError> {
    ensure_unlocked(storage)?;
    REENTRANCY_LOCK.save(storage, &true)?;
    Ok(())
}

/// Release the lock.
pub fn exit(storage: &mut dyn Storage) {
    REENTRANCY_LOCK.remove(storage);
}

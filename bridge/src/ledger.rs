//! Ledger collaborator (CW20).
//!
//! The controller never keeps balances of its own; it drives the token contract
//! with the messages below and reads balances and decimals back from it.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use crate::state::TokenMode;

/// Debit `amount` from `holder` for an outbound transfer.
///
/// Relies on an allowance granted by `holder` to the controller.
pub fn debit_msg(
    mode: &TokenMode,
    token: &str,
    holder: &Addr,
    controller: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    let msg = match mode {
        TokenMode::MintBurn => Cw20ExecuteMsg::BurnFrom {
            owner: holder.to_string(),
            amount,
        },
        TokenMode::LockUnlock => Cw20ExecuteMsg::TransferFrom {
            owner: holder.to_string(),
            recipient: controller.to_string(),
            amount,
        },
    };
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&msg)?,
        funds: vec![],
    }))
}

/// Credit `amount` to `recipient` for an inbound transfer.
pub fn credit_msg(
    mode: &TokenMode,
    token: &str,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    let msg = match mode {
        TokenMode::MintBurn => Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
        TokenMode::LockUnlock => Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    };
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&msg)?,
        funds: vec![],
    }))
}

pub fn balance_of(querier: &QuerierWrapper, token: &str, holder: &Addr) -> StdResult<Uint128> {
    let res: BalanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: holder.to_string(),
        },
    )?;
    Ok(res.balance)
}

pub fn token_decimals(querier: &QuerierWrapper, token: &str) -> StdResult<u8> {
    let res: TokenInfoResponse = querier.query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})?;
    Ok(res.decimals)
}

//! Transport collaborator (cross-chain endpoint).

use common::{EndpointExecuteMsg, EndpointQueryMsg, EstimateFeeResponse};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};

/// Fee the endpoint charges to relay `payload` to `dst_chain_id`.
pub fn estimate_fee(
    querier: &QuerierWrapper,
    endpoint: &Addr,
    dst_chain_id: u16,
    payload: &[u8],
    adapter_params: &Binary,
) -> StdResult<Uint128> {
    let res: EstimateFeeResponse = querier.query_wasm_smart(
        endpoint,
        &EndpointQueryMsg::EstimateFee {
            dst_chain_id,
            payload: Binary::from(payload),
            adapter_params: adapter_params.clone(),
        },
    )?;
    Ok(res.native_fee)
}

/// Hand `payload` to the endpoint for delivery to `destination`.
pub fn send_msg(
    endpoint: &Addr,
    dst_chain_id: u16,
    destination: Binary,
    payload: Vec<u8>,
    refund_address: &Addr,
    adapter_params: Binary,
    fee: Option<Coin>,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: endpoint.to_string(),
        msg: to_json_binary(&EndpointExecuteMsg::Send {
            dst_chain_id,
            destination,
            payload: Binary::from(payload),
            refund_address: refund_address.to_string(),
            adapter_params,
        })?,
        funds: fee.into_iter().collect(),
    }))
}

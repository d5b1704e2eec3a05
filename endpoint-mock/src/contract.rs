use cosmwasm_std::{
    entry_point, to_json_binary, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env,
    MessageInfo, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use common::{EstimateFeeResponse, ReceiverExecuteMsg};

use crate::error::ContractError;
use crate::msg::{ConfigResponse, ExecuteMsg, InstantiateMsg, NonceResponse, QueryMsg};
use crate::state::{
    Config, Packet, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, INBOUND_NONCE, OUTBOUND_NONCE,
    PACKETS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let relayer = deps.api.addr_validate(&msg.relayer)?;
    let config = Config {
        relayer,
        chain_id: msg.chain_id,
        fee_denom: msg.fee_denom,
        base_fee: msg.base_fee,
        per_byte_fee: msg.per_byte_fee,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("relayer", config.relayer)
        .add_attribute("chain_id", config.chain_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Send {
            dst_chain_id,
            destination,
            payload,
            refund_address,
            adapter_params: _,
        } => execute_send(deps, info, dst_chain_id, destination, payload, refund_address),
        ExecuteMsg::Deliver {
            src_chain_id,
            src_address,
            destination,
            payload,
        } => execute_deliver(deps, info, src_chain_id, src_address, destination, payload),
        ExecuteMsg::SetFee {
            base_fee,
            per_byte_fee,
        } => execute_set_fee(deps, info, base_fee, per_byte_fee),
    }
}

fn execute_send(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u16,
    destination: Binary,
    payload: Binary,
    refund_address: String,
) -> Result<Response, ContractError> {
    if payload.is_empty() {
        return Err(ContractError::EmptyPayload);
    }
    let config = CONFIG.load(deps.storage)?;
    let refund_address = deps.api.addr_validate(&refund_address)?;

    let expected = config.fee_for(payload.len());
    let paid: Uint128 = info
        .funds
        .iter()
        .filter(|c| c.denom == config.fee_denom)
        .map(|c| c.amount)
        .sum();
    if paid < expected {
        return Err(ContractError::InsufficientFee {
            expected,
            got: paid,
        });
    }

    let nonce = OUTBOUND_NONCE
        .may_load(deps.storage, (dst_chain_id, destination.as_slice()))?
        .unwrap_or(0)
        + 1;
    OUTBOUND_NONCE.save(deps.storage, (dst_chain_id, destination.as_slice()), &nonce)?;

    let packet = Packet {
        src_chain_id: config.chain_id,
        src_address: Binary::from(info.sender.as_str().as_bytes()),
        dst_chain_id,
        destination: destination.clone(),
        nonce,
        payload,
        fee_paid: expected,
    };
    PACKETS.save(
        deps.storage,
        (dst_chain_id, destination.as_slice(), nonce),
        &packet,
    )?;

    let mut res = Response::new();
    let excess = paid - expected;
    if !excess.is_zero() {
        res = res.add_message(BankMsg::Send {
            to_address: refund_address.to_string(),
            amount: vec![Coin {
                denom: config.fee_denom,
                amount: excess,
            }],
        });
    }

    Ok(res
        .set_data(to_json_binary(&nonce)?)
        .add_attribute("action", "send")
        .add_attribute("sender", info.sender)
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("fee", expected)
        .add_attribute("refund", excess))
}

fn execute_deliver(
    deps: DepsMut,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    destination: String,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relayer {
        return Err(ContractError::Unauthorized);
    }
    let destination = deps.api.addr_validate(&destination)?;

    let nonce = INBOUND_NONCE
        .may_load(deps.storage, (src_chain_id, src_address.as_slice()))?
        .unwrap_or(0)
        + 1;
    INBOUND_NONCE.save(deps.storage, (src_chain_id, src_address.as_slice()), &nonce)?;

    // Plain message: a rejected delivery reverts the nonce bump with it
    let receive = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: destination.to_string(),
        msg: to_json_binary(&ReceiverExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(receive)
        .add_attribute("action", "deliver")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("destination", destination)
        .add_attribute("nonce", nonce.to_string()))
}

fn execute_set_fee(
    deps: DepsMut,
    info: MessageInfo,
    base_fee: Uint128,
    per_byte_fee: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.relayer {
        return Err(ContractError::Unauthorized);
    }

    config.base_fee = base_fee;
    config.per_byte_fee = per_byte_fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_fee")
        .add_attribute("base_fee", base_fee)
        .add_attribute("per_byte_fee", per_byte_fee))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::EstimateFee { payload, .. } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&EstimateFeeResponse {
                native_fee: config.fee_for(payload.len()),
            })
        }
        QueryMsg::OutboundPacket {
            dst_chain_id,
            destination,
            nonce,
        } => to_json_binary(&PACKETS.load(
            deps.storage,
            (dst_chain_id, destination.as_slice(), nonce),
        )?),
        QueryMsg::OutboundNonce {
            dst_chain_id,
            destination,
        } => {
            let nonce = OUTBOUND_NONCE
                .may_load(deps.storage, (dst_chain_id, destination.as_slice()))?
                .unwrap_or(0);
            to_json_binary(&NonceResponse { nonce })
        }
        QueryMsg::InboundNonce {
            src_chain_id,
            src_address,
        } => {
            let nonce = INBOUND_NONCE
                .may_load(deps.storage, (src_chain_id, src_address.as_slice()))?
                .unwrap_or(0);
            to_json_binary(&NonceResponse { nonce })
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                relayer: config.relayer,
                chain_id: config.chain_id,
                fee_denom: config.fee_denom,
                base_fee: config.base_fee,
                per_byte_fee: config.per_byte_fee,
            })
        }
    }
}

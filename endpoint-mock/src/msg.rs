use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::state::Packet;

#[cw_serde]
pub struct InstantiateMsg {
    /// Relayer allowed to deliver packets and set fees
    pub relayer: String,
    /// Transport chain id of this chain
    pub chain_id: u16,
    pub fee_denom: String,
    pub base_fee: Uint128,
    pub per_byte_fee: Uint128,
}

/// `Send` and `EstimateFee` serialize identically to `common::endpoint`.
#[cw_serde]
pub enum ExecuteMsg {
    /// Accept a payload from the calling contract (fee attached)
    Send {
        dst_chain_id: u16,
        destination: Binary,
        payload: Binary,
        refund_address: String,
        adapter_params: Binary,
    },
    /// Relayer: hand a packet from `src_chain_id` to a local receiver
    Deliver {
        src_chain_id: u16,
        src_address: Binary,
        destination: String,
        payload: Binary,
    },
    /// Relayer: update the fee schedule
    SetFee {
        base_fee: Uint128,
        per_byte_fee: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(common::EstimateFeeResponse)]
    EstimateFee {
        dst_chain_id: u16,
        payload: Binary,
        adapter_params: Binary,
    },
    #[returns(Packet)]
    OutboundPacket {
        dst_chain_id: u16,
        destination: Binary,
        nonce: u64,
    },
    /// Last nonce used towards a destination (0 if none)
    #[returns(NonceResponse)]
    OutboundNonce {
        dst_chain_id: u16,
        destination: Binary,
    },
    /// Last nonce delivered from a source (0 if none)
    #[returns(NonceResponse)]
    InboundNonce {
        src_chain_id: u16,
        src_address: Binary,
    },
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct ConfigResponse {
    pub relayer: Addr,
    pub chain_id: u16,
    pub fee_denom: String,
    pub base_fee: Uint128,
    pub per_byte_fee: Uint128,
}

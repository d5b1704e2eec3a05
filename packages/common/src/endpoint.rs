//! Transport endpoint interface.
//!
//! The endpoint is the only contract allowed to deliver inbound messages to a
//! controller, and the only place outbound payloads are handed to. Chain ids are
//! transport-level `u16` identifiers; paths are opaque byte strings.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

/// Messages a controller sends to the endpoint.
#[cw_serde]
pub enum EndpointExecuteMsg {
    /// Relay `payload` to `destination` on `dst_chain_id`.
    ///
    /// The relay fee is attached as native funds. Any excess over the
    /// estimated fee is refunded to `refund_address`.
    Send {
        dst_chain_id: u16,
        destination: Binary,
        payload: Binary,
        refund_address: String,
        adapter_params: Binary,
    },
}

/// Queries a controller issues against the endpoint.
#[cw_serde]
#[derive(QueryResponses)]
pub enum EndpointQueryMsg {
    /// Native fee required to relay `payload` to `dst_chain_id`.
    #[returns(EstimateFeeResponse)]
    EstimateFee {
        dst_chain_id: u16,
        payload: Binary,
        adapter_params: Binary,
    },
}

#[cw_serde]
pub struct EstimateFeeResponse {
    /// Fee denominated in the endpoint's fee denom
    pub native_fee: Uint128,
}

/// Messages the endpoint sends to a receiving controller.
///
/// Serializes identically to the controller's own `ExecuteMsg::LzReceive`.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
}

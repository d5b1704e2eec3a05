use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:endpoint-mock";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Only address allowed to deliver packets and change fees
    pub relayer: Addr,
    /// Transport chain id of the chain this endpoint lives on
    pub chain_id: u16,
    pub fee_denom: String,
    pub base_fee: Uint128,
    pub per_byte_fee: Uint128,
}

impl Config {
    pub fn fee_for(&self, payload_len: usize) -> Uint128 {
        self.base_fee + self.per_byte_fee * Uint128::from(payload_len as u128)
    }
}

/// A payload accepted by `Send`, waiting for a relayer
#[cw_serde]
pub struct Packet {
    pub src_chain_id: u16,
    /// Sending contract address as bytes, the path receivers authenticate
    pub src_address: Binary,
    pub dst_chain_id: u16,
    pub destination: Binary,
    pub nonce: u64,
    pub payload: Binary,
    pub fee_paid: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (dst_chain_id, destination) => last outbound nonce
pub const OUTBOUND_NONCE: Map<(u16, &[u8]), u64> = Map::new("outbound_nonce");

/// (dst_chain_id, destination, nonce) => packet
pub const PACKETS: Map<(u16, &[u8], u64), Packet> = Map::new("packets");

/// (src_chain_id, src_address) => last delivered nonce
pub const INBOUND_NONCE: Map<(u16, &[u8]), u64> = Map::new("inbound_nonce");

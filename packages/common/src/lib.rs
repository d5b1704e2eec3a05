//! Common - Shared Types for the Token Bridge Contracts
//!
//! This package defines the message set spoken between a bridge controller and
//! the cross-chain transport endpoint that relays its payloads. Both the
//! controller and the mock endpoint depend on it so the JSON shapes can never
//! drift apart.

pub mod endpoint;

pub use endpoint::{
    EndpointExecuteMsg, EndpointQueryMsg, EstimateFeeResponse, ReceiverExecuteMsg,
};

//! Execute handlers for the token bridge controller.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - BridgeToken (debit, encode, hand to transport)
//! - `inbound` - LzReceive and the ledger reply that records failures
//! - `retry` - RetryMessage and its ledger reply
//! - `config` - Whitelist, trusted remote and endpoint management
//! - `admin` - Pause, unpause, admin transfer and upgrade authorization

mod admin;
mod config;
mod inbound;
mod outgoing;
mod retry;

pub use admin::*;
pub use config::*;
pub use inbound::*;
pub use outgoing::*;
pub use retry::*;

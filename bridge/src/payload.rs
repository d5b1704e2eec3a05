//! Transfer payload codec
//!
//! # Byte Layout
//! - Byte 0:              packet type (`0x00` = transfer)
//! - Bytes 1-2:           token length `T` (u16, big-endian)
//! - Bytes 3..3+T:        token identifier (UTF-8)
//! - Next 2 bytes:        recipient length `R` (u16, big-endian)
//! - Next R bytes:        recipient address (UTF-8)
//! - Last 8 bytes:        amount in shared decimals (u64, big-endian)
//!
//! Decoding is strict, so `encode(decode(bytes)) == bytes` for every accepted
//! input and the payload digest is a faithful identity for the transfer.

use cosmwasm_schema::cw_serde;

use crate::error::ContractError;

/// Packet type tag for token transfers
pub const PT_TRANSFER: u8 = 0;

const LEN_PREFIX: usize = 2;
const AMOUNT_LEN: usize = 8;

#[cw_serde]
pub struct TransferPayload {
    /// Token identifier, identical on every chain the asset is bridged to
    pub token: String,
    /// Recipient address on the destination chain
    pub recipient: String,
    /// Amount in shared decimals
    pub amount: u64,
}

impl TransferPayload {
    pub fn encode(&self) -> Result<Vec<u8>, ContractError> {
        if self.token.is_empty() {
            return Err(invalid("empty token"));
        }
        if self.recipient.is_empty() {
            return Err(invalid("empty recipient"));
        }
        let token_len = u16::try_from(self.token.len()).map_err(|_| invalid("token too long"))?;
        let recipient_len =
            u16::try_from(self.recipient.len()).map_err(|_| invalid("recipient too long"))?;

        let mut out = Vec::with_capacity(
            1 + LEN_PREFIX * 2 + self.token.len() + self.recipient.len() + AMOUNT_LEN,
        );
        out.push(PT_TRANSFER);
        out.extend_from_slice(&token_len.to_be_bytes());
        out.extend_from_slice(self.token.as_bytes());
        out.extend_from_slice(&recipient_len.to_be_bytes());
        out.extend_from_slice(self.recipient.as_bytes());
        out.extend_from_slice(&self.amount.to_be_bytes());
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ContractError> {
        let mut reader = Reader { bytes, pos: 0 };

        let packet_type = reader.take(1)?[0];
        if packet_type != PT_TRANSFER {
            return Err(invalid(&format!("unknown packet type {}", packet_type)));
        }

        let token = reader.string("token")?;
        let recipient = reader.string("recipient")?;

        let mut amount_bytes = [0u8; AMOUNT_LEN];
        amount_bytes.copy_from_slice(reader.take(AMOUNT_LEN)?);
        let amount = u64::from_be_bytes(amount_bytes);

        if reader.pos != bytes.len() {
            return Err(invalid(&format!(
                "{} trailing bytes",
                bytes.len() - reader.pos
            )));
        }

        Ok(Self {
            token,
            recipient,
            amount,
        })
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ContractError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| invalid("truncated"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn string(&mut self, field: &str) -> Result<String, ContractError> {
        let mut len_bytes = [0u8; LEN_PREFIX];
        len_bytes.copy_from_slice(self.take(LEN_PREFIX)?);
        let len = u16::from_be_bytes(len_bytes) as usize;
        if len == 0 {
            return Err(invalid(&format!("empty {}", field)));
        }
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| invalid(&format!("{} is not UTF-8", field)))
    }
}

fn invalid(reason: &str) -> ContractError {
    ContractError::InvalidPayload {
        reason: reason.to_string(),
    }
}

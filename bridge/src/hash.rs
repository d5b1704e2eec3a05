//! Payload digests for the failed-message store
//!
//! A failed message is remembered only by the keccak256 digest of its raw
//! payload bytes. The all-zero digest is reserved to mean "no outstanding
//! failure" on the query surface.

use tiny_keccak::{Hasher, Keccak};

/// Digest reported for keys without an outstanding failure
pub const ZERO_DIGEST: [u8; 32] = [0u8; 32];

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert a 32-byte digest to a 0x-prefixed hex string (for attributes)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Hex-encode an opaque path for attributes
pub fn path_to_hex(path: &[u8]) -> String {
    format!("0x{}", hex::encode(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        // keccak256("") = c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470
        let expected =
            hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap();
        assert_eq!(keccak256(b"").to_vec(), expected);
    }

    #[test]
    fn test_keccak256_is_never_zero_for_payloads() {
        assert_ne!(keccak256(&[0u8]), ZERO_DIGEST);
        assert_ne!(keccak256(b"payload"), ZERO_DIGEST);
    }

    #[test]
    fn test_hex_helpers() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0xab;
        let s = bytes32_to_hex(&bytes);
        assert_eq!(s.len(), 66);
        assert!(s.starts_with("0x00"));
        assert!(s.ends_with("ab"));
        assert_eq!(path_to_hex(&[0xde, 0xad]), "0xdead");
    }
}

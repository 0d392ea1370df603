//! # ABI Word Encoding
//!
//! Minimal `abi.encode` equivalent for static types: every value occupies one
//! 32-byte big-endian word. Only the static types the bridge hashes are
//! supported (address, bytes32, unsigned integers).

use crate::entities::{Address, Bytes32, Hash, U256};
use sha3::{Digest, Keccak256};

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Builder for a sequence of 32-byte ABI words.
#[derive(Debug, Clone, Default)]
pub struct AbiEncoder {
    buf: Vec<u8>,
}

impl AbiEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw 32-byte word.
    pub fn bytes32(mut self, value: &Bytes32) -> Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Append an address, left-padded to 32 bytes.
    pub fn address(mut self, value: &Address) -> Self {
        self.buf.extend_from_slice(&[0u8; 12]);
        self.buf.extend_from_slice(value);
        self
    }

    /// Append an unsigned integer as a big-endian word.
    pub fn uint(mut self, value: impl Into<U256>) -> Self {
        let mut word = [0u8; 32];
        value.into().to_big_endian(&mut word);
        self.buf.extend_from_slice(&word);
        self
    }

    /// Encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// keccak256 of the encoded bytes.
    pub fn hash(self) -> Hash {
        keccak256(&self.buf)
    }
}

/// Decode a single ABI-encoded address word. The 12 padding bytes must be zero.
pub fn decode_address(word: &[u8]) -> Option<Address> {
    if word.len() != 32 || word[..12].iter().any(|&b| b != 0) {
        return None;
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[12..]);
    Some(address)
}

//! # Domain Entities
//!
//! Wire formats for keys and signatures.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Length of one recoverable signature record (`r || s || v`).
pub const ECDSA_RECORD_LEN: usize = 65;

/// Length of an uncompressed secp256k1 key without the SEC1 tag (`x || y`).
pub const ECDSA_PUBLIC_KEY_LEN: usize = 64;

/// Length of a compressed BLS12-381 G1 signature.
pub const BLS_SIGNATURE_LEN: usize = 48;

/// Length of a compressed BLS12-381 G2 public key.
pub const BLS_PUBLIC_KEY_LEN: usize = 96;

/// Aggregate key registration material: public key followed by its proof of possession.
pub const BLS_KEY_MATERIAL_LEN: usize = BLS_PUBLIC_KEY_LEN + BLS_SIGNATURE_LEN;

/// Which family of signatures a verifier accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeKind {
    /// One recoverable secp256k1 signature per signer.
    Recoverable,
    /// One BLS aggregate signature standing for every signer.
    Aggregate,
}

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Decode a 65-byte `r || s || v` record.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != ECDSA_RECORD_LEN {
            return Err(SignatureError::InvalidFormat);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Encode as a 65-byte `r || s || v` record.
    pub fn to_bytes(&self) -> [u8; ECDSA_RECORD_LEN] {
        let mut out = [0u8; ECDSA_RECORD_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// ECDSA public key, uncompressed coordinates without the `0x04` tag.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaPublicKey {
    /// `x || y`
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; ECDSA_PUBLIC_KEY_LEN],
}

impl EcdsaPublicKey {
    /// X coordinate.
    pub fn x(&self) -> &[u8] {
        &self.bytes[..32]
    }

    /// Y coordinate.
    pub fn y(&self) -> &[u8] {
        &self.bytes[32..]
    }
}

// =============================================================================
// BLS Types (BLS12-381)
// =============================================================================

/// BLS signature (G1 point, compressed).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature {
    /// G1 point (48 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; BLS_SIGNATURE_LEN],
}

/// BLS public key (G2 point, compressed).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsPublicKey {
    /// G2 point (96 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; BLS_PUBLIC_KEY_LEN],
}

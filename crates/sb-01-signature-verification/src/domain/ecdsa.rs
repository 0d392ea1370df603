//! # ECDSA Verification (secp256k1)
//!
//! Pure domain logic for recoverable signature records.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **R Point Validation**: R must be a valid x-coordinate on the secp256k1 curve
//! - **Key Binding**: a record only counts for a signer when the recovered key
//!   is the key registered for that signer, not merely one hashing to the
//!   same address
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance

use super::entities::{EcdsaPublicKey, EcdsaSignature, ECDSA_PUBLIC_KEY_LEN};
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::point::DecompressPoint;
use k256::{AffinePoint, FieldBytes};
use shared_types::{keccak256, Address, Hash};
use subtle::{Choice, ConstantTimeEq, ConstantTimeLess};

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// ECDSA VERIFIER
// =============================================================================

/// Stateless ECDSA signer checks.
#[derive(Debug, Clone, Default)]
pub struct EcdsaVerifier;

impl EcdsaVerifier {
    /// Create a new ECDSA verifier.
    pub fn new() -> Self {
        Self
    }

    /// Check that `signature` over `message_hash` was produced by `signer`
    /// holding exactly `registered_key`.
    pub fn verify_signer(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
        signer: Address,
        registered_key: &EcdsaPublicKey,
    ) -> Result<(), SignatureError> {
        verify_signer(message_hash, signature, signer, registered_key)
    }

    /// Check every `(record, signer, key)` triple in parallel.
    ///
    /// Returns `false` for an empty batch.
    pub fn batch_verify_signers(
        &self,
        message_hash: &Hash,
        batch: &[(EcdsaSignature, Address, EcdsaPublicKey)],
    ) -> bool {
        batch_verify_signers(message_hash, batch)
    }
}

// =============================================================================
// CORE VERIFICATION FUNCTIONS
// =============================================================================

/// Validate the signature components before any curve arithmetic.
///
/// 1. R is in [1, n-1] and is an x-coordinate on the curve
/// 2. S is in [1, n-1] and in the lower half (EIP-2)
/// 3. v is 0, 1, 27 or 28
fn validate_components(signature: &EcdsaSignature) -> Result<RecoveryId, SignatureError> {
    if !is_valid_scalar(&signature.r) || !is_valid_r_coordinate(&signature.r) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }
    parse_recovery_id(signature.v)
}

/// Recover the signing key from a validated signature.
pub fn recover_key(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<VerifyingKey, SignatureError> {
    use zeroize::Zeroize;

    let recovery_id = validate_components(signature)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)
}

/// Recover the signer's address from a signature.
pub fn recover_address(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    let key = recover_key(message_hash, signature)?;
    Ok(address_from_pubkey(&encode_public_key(&key)))
}

/// Check one signer: the recovered address must be `signer` and the
/// recovered key must equal `registered_key`.
pub fn verify_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    signer: Address,
    registered_key: &EcdsaPublicKey,
) -> Result<(), SignatureError> {
    let recovered = encode_public_key(&recover_key(message_hash, signature)?);
    let actual = address_from_pubkey(&recovered);
    if actual != signer {
        return Err(SignatureError::SignerMismatch {
            expected: signer,
            actual,
        });
    }
    if !bool::from(recovered.bytes[..].ct_eq(&registered_key.bytes[..])) {
        return Err(SignatureError::InvalidPublicKey(
            "recovered key differs from registered key",
        ));
    }
    Ok(())
}

/// Batch verify signer records in parallel.
pub fn batch_verify_signers(
    message_hash: &Hash,
    batch: &[(EcdsaSignature, Address, EcdsaPublicKey)],
) -> bool {
    use rayon::prelude::*;

    if batch.is_empty() {
        return false;
    }
    batch.par_iter().all(|(signature, signer, key)| {
        match verify_signer(message_hash, signature, *signer, key) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    "[sb-01] record for {} rejected: {}",
                    shared_types::short_hex(signer),
                    e
                );
                false
            }
        }
    })
}

// =============================================================================
// KEY HANDLING
// =============================================================================

/// Derive the address owning a public key: last 20 bytes of `keccak256(x || y)`.
pub fn address_from_pubkey(public_key: &EcdsaPublicKey) -> Address {
    let hash = keccak256(&public_key.bytes);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Parse registration material into a curve-checked public key.
///
/// Rejects wrong lengths, zero coordinates and points not on secp256k1.
pub fn parse_public_key(bytes: &[u8]) -> Result<EcdsaPublicKey, SignatureError> {
    if bytes.len() != ECDSA_PUBLIC_KEY_LEN {
        return Err(SignatureError::InvalidPublicKey("expected 64 bytes"));
    }
    if bytes[..32].iter().all(|&b| b == 0) || bytes[32..].iter().all(|&b| b == 0) {
        return Err(SignatureError::InvalidPublicKey("zero coordinate"));
    }

    let mut sec1 = [0u8; 1 + ECDSA_PUBLIC_KEY_LEN];
    sec1[0] = 0x04;
    sec1[1..].copy_from_slice(bytes);
    let key = VerifyingKey::from_sec1_bytes(&sec1)
        .map_err(|_| SignatureError::InvalidPublicKey("point not on curve"))?;

    Ok(encode_public_key(&key))
}

/// Uncompressed `x || y` form of a verifying key.
pub fn encode_public_key(key: &VerifyingKey) -> EcdsaPublicKey {
    let point = key.to_encoded_point(false);
    let mut bytes = [0u8; ECDSA_PUBLIC_KEY_LEN];
    // Skip the 0x04 tag
    bytes.copy_from_slice(&point.as_bytes()[1..]);
    EcdsaPublicKey { bytes }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Big-endian `a < b` over 32 bytes without data-dependent branches.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut decided = Choice::from(0u8);
    for (x, y) in a.iter().zip(b) {
        less |= !decided & x.ct_lt(y);
        decided |= !x.ct_eq(y);
    }
    less
}

/// EIP-2: `s` strictly below half the curve order.
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER).into()
}

/// Scalar in `[1, n-1]`.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let nonzero = !scalar[..].ct_eq(&[0u8; 32][..]);
    (nonzero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// `r` must be the x-coordinate of some curve point.
fn is_valid_r_coordinate(r: &[u8; 32]) -> bool {
    let x = FieldBytes::clone_from_slice(r);
    AffinePoint::decompress(&x, Choice::from(0u8))
        .is_some()
        .into()
}

/// `v` in `{0, 1}` or its legacy `{27, 28}` form.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    match v.checked_sub(27).unwrap_or(v) {
        parity @ (0 | 1) => Ok(RecoveryId::new(parity == 1, false)),
        _ => Err(SignatureError::InvalidRecoveryId(v)),
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;
    use crate::domain::blob::join_records;
    use k256::elliptic_curve::PrimeField;
    use k256::Scalar;
    pub use k256::ecdsa::SigningKey;

    /// Generate a new ECDSA keypair.
    pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let verifying_key = *signing_key.verifying_key();
        (signing_key, verifying_key)
    }

    /// Registration material (`x || y`) for a signing key.
    pub fn public_key_bytes(private_key: &SigningKey) -> Vec<u8> {
        encode_public_key(private_key.verifying_key()).bytes.to_vec()
    }

    /// Address owning a signing key.
    pub fn address_of(private_key: &SigningKey) -> Address {
        address_from_pubkey(&encode_public_key(private_key.verifying_key()))
    }

    /// Sign a message hash, normalised to low S.
    pub fn sign(message_hash: &Hash, private_key: &SigningKey) -> EcdsaSignature {
        let (mut sig, mut recid) = private_key
            .sign_prehash_recoverable(message_hash)
            .expect("signing failed");

        // Mirroring S flips the parity of R's y-coordinate
        if let Some(low) = sig.normalize_s() {
            sig = low;
            recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
        }

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        EcdsaSignature {
            r,
            s,
            v: recid.to_byte() + 27,
        }
    }

    /// `n - s`: the same signature with S in the other half of the order.
    pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
        let scalar = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(s)))
            .expect("s below the curve order");
        let mut out = [0u8; 32];
        out.copy_from_slice(&(-scalar).to_repr());
        out
    }

    /// Concatenated 65-byte records, one per key, in the given order.
    pub fn sign_blob(message_hash: &Hash, keys: &[&SigningKey]) -> Vec<u8> {
        let records: Vec<_> = keys
            .iter()
            .map(|k| sign(message_hash, k).to_bytes())
            .collect();
        join_records(&records)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

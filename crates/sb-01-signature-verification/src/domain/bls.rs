//! # BLS Verification (BLS12-381)
//!
//! Pure domain logic for aggregate quorum signatures.
//!
//! ## Implementation Details
//!
//! - Signatures are on G1 (48 bytes compressed)
//! - Public keys are on G2 (96 bytes compressed)
//! - Every signer signs the same digest, so a quorum check is a single
//!   fast-aggregate pairing check over the signers' keys
//! - Keys enter the registry only with a proof of possession, which rules
//!   out rogue-key cancellation inside the aggregate
//!
//! This uses blst's `min_sig` variant for smaller signatures.

use super::entities::{BlsPublicKey, BlsSignature, BLS_KEY_MATERIAL_LEN, BLS_PUBLIC_KEY_LEN};
use super::errors::SignatureError;
use blst::min_sig::{AggregateSignature, PublicKey, Signature};
use blst::BLST_ERROR;

/// Domain Separation Tag for attestation signatures.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// Domain Separation Tag for proofs of possession.
pub const POP_DST: &[u8] = b"BLS_POP_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// Parse and subgroup-check a compressed public key.
///
/// The identity point is rejected.
pub fn parse_public_key(bytes: &[u8]) -> Result<BlsPublicKey, SignatureError> {
    if bytes.len() != BLS_PUBLIC_KEY_LEN {
        return Err(SignatureError::InvalidPublicKey("expected 96 bytes"));
    }
    let pk = PublicKey::key_validate(bytes)
        .map_err(|_| SignatureError::InvalidPublicKey("not a valid G2 point"))?;
    Ok(BlsPublicKey {
        bytes: pk.to_bytes(),
    })
}

/// Check a proof of possession: a signature by the key over its own bytes.
pub fn verify_proof_of_possession(public_key: &BlsPublicKey, proof: &[u8]) -> bool {
    let Ok(sig) = Signature::from_bytes(proof) else {
        return false;
    };
    let Ok(pk) = PublicKey::from_bytes(&public_key.bytes) else {
        return false;
    };
    sig.verify(true, &public_key.bytes, POP_DST, &[], &pk, true) == BLST_ERROR::BLST_SUCCESS
}

/// Split and check aggregate registration material (`pk || pop`).
pub fn parse_key_material(material: &[u8]) -> Result<BlsPublicKey, SignatureError> {
    if material.len() != BLS_KEY_MATERIAL_LEN {
        return Err(SignatureError::InvalidPublicKey(
            "expected 144 bytes of key material",
        ));
    }
    let (key_bytes, proof) = material.split_at(BLS_PUBLIC_KEY_LEN);
    let public_key = parse_public_key(key_bytes)?;
    if !verify_proof_of_possession(&public_key, proof) {
        return Err(SignatureError::InvalidProofOfPossession);
    }
    Ok(public_key)
}

/// Verify one aggregate signature over a shared message against every key.
///
/// Returns `false` for an empty key set or any unparsable input.
pub fn fast_aggregate_verify(
    message: &[u8],
    aggregate_signature: &[u8],
    public_keys: &[BlsPublicKey],
) -> bool {
    if public_keys.is_empty() {
        return false;
    }

    let Ok(sig) = Signature::from_bytes(aggregate_signature) else {
        return false;
    };

    let pks: Vec<PublicKey> = public_keys
        .iter()
        .filter_map(|pk| PublicKey::from_bytes(&pk.bytes).ok())
        .collect();
    if pks.len() != public_keys.len() {
        return false;
    }

    let pk_refs: Vec<&PublicKey> = pks.iter().collect();
    sig.fast_aggregate_verify(true, message, DST, &pk_refs) == BLST_ERROR::BLST_SUCCESS
}

/// Aggregate multiple BLS signatures into one.
///
/// # Errors
/// * `EmptyAggregation` if the input list is empty
pub fn aggregate_bls_signatures(
    signatures: &[BlsSignature],
) -> Result<BlsSignature, SignatureError> {
    let (first, rest) = signatures
        .split_first()
        .ok_or(SignatureError::EmptyAggregation)?;

    let first_sig =
        Signature::from_bytes(&first.bytes).map_err(|_| SignatureError::InvalidFormat)?;
    let mut aggregate = AggregateSignature::from_signature(&first_sig);

    for sig in rest {
        let parsed =
            Signature::from_bytes(&sig.bytes).map_err(|_| SignatureError::InvalidFormat)?;
        aggregate
            .add_signature(&parsed, true)
            .map_err(|_| SignatureError::BlsPairingFailed)?;
    }

    Ok(BlsSignature {
        bytes: aggregate.to_signature().to_bytes(),
    })
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;
    pub use blst::min_sig::SecretKey;

    /// Generate a new BLS keypair.
    pub fn generate_keypair() -> (SecretKey, BlsPublicKey) {
        let mut ikm = [0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut ikm);
        let sk = SecretKey::key_gen(&ikm, &[]).expect("32 bytes of ikm");
        let pk = sk.sk_to_pk();
        (
            sk,
            BlsPublicKey {
                bytes: pk.to_bytes(),
            },
        )
    }

    /// Sign a message under the attestation DST.
    pub fn sign(message: &[u8], sk: &SecretKey) -> BlsSignature {
        BlsSignature {
            bytes: sk.sign(message, DST, &[]).to_bytes(),
        }
    }

    /// Registration material: public key followed by its proof of possession.
    pub fn key_material(sk: &SecretKey) -> Vec<u8> {
        let pk = sk.sk_to_pk().to_bytes();
        let pop = sk.sign(&pk, POP_DST, &[]).to_bytes();
        let mut material = pk.to_vec();
        material.extend_from_slice(&pop);
        material
    }

    /// Aggregate signature blob by every key, in order.
    pub fn sign_blob(message: &[u8], keys: &[&SecretKey]) -> Vec<u8> {
        let signatures: Vec<_> = keys.iter().map(|sk| sign(message, sk)).collect();
        aggregate_bls_signatures(&signatures)
            .expect("non-empty key list")
            .bytes
            .to_vec()
    }
}

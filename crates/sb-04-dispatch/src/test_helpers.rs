//! Attestation-side helpers: what an off-chain signer does before calling
//! `verify_and_dispatch`.

use crate::domain::{DepositPayload, Eip712Domain};
use sb_01_signature_verification::{bls_test_helpers, ecdsa_test_helpers};

pub use bls_test_helpers::SecretKey;
pub use ecdsa_test_helpers::SigningKey;

/// A well-formed payload with the given nonce.
pub fn sample_payload(nonce: u64) -> DepositPayload {
    DepositPayload {
        source_tx_id: [0xAB; 32],
        amount: 1_000_000_000,
        secret_hash: [0xCD; 32],
        destination_address: [0xEF; 32],
        nonce,
        source_block_height: 100,
    }
}

/// Recoverable-scheme blob: one record per key, in signer order.
pub fn attest_recoverable(
    domain: &Eip712Domain,
    payload: &DepositPayload,
    keys: &[&SigningKey],
) -> Vec<u8> {
    ecdsa_test_helpers::sign_blob(&domain.digest(payload), keys)
}

/// Aggregate-scheme blob: one signature standing for every key.
pub fn attest_aggregate(
    domain: &Eip712Domain,
    payload: &DepositPayload,
    keys: &[&SecretKey],
) -> Vec<u8> {
    bls_test_helpers::sign_blob(&domain.digest(payload), keys)
}

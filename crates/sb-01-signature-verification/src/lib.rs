//! # Signature Verification Subsystem (SB-01)
//!
//! Per-operator key registry and batch signature verification for quorum
//! attestations.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no state
//! - **Ports Layer** (`ports/`): The `SignatureScheme` capability the
//!   orchestrator programs against
//! - **Schemes** (`schemes/`): Concrete verifiers, chosen once at construction
//!
//! ## Schemes
//!
//! | Scheme | Key | Blob |
//! |--------|-----|------|
//! | Recoverable (ECDSA secp256k1) | 64-byte `x \|\| y` | `n` × 65-byte `r \|\| s \|\| v` |
//! | Aggregate (BLS12-381 min-sig) | 96-byte G2 key + 48-byte PoP | one 48-byte G1 signature |
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Rogue-key defence**: aggregate keys must carry a proof of possession
//! - **No partial credit**: `verify` is false unless every named signer is proven

pub mod domain;
pub mod ports;
pub mod schemes;

// Re-export public API
pub use domain::bls::{aggregate_bls_signatures, fast_aggregate_verify};
pub use domain::ecdsa::{address_from_pubkey, recover_address, EcdsaVerifier};
pub use domain::entities::{
    BlsPublicKey, BlsSignature, EcdsaPublicKey, EcdsaSignature, SchemeKind,
    BLS_KEY_MATERIAL_LEN, BLS_PUBLIC_KEY_LEN, BLS_SIGNATURE_LEN, ECDSA_PUBLIC_KEY_LEN,
    ECDSA_RECORD_LEN,
};
pub use domain::errors::SignatureError;
pub use ports::inbound::SignatureScheme;
pub use schemes::{AggregateSignatureVerifier, RecoverableSignatureVerifier};

#[cfg(any(test, feature = "test-helpers"))]
pub use domain::{bls::test_helpers as bls_test_helpers, ecdsa::test_helpers as ecdsa_test_helpers};

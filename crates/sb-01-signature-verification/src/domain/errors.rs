//! # Signature Errors
//!
//! Error types for key registration and signature decoding.
//!
//! `SignatureScheme::verify` never surfaces these; it folds every failure
//! into `false` and logs the reason at debug level.

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur during key registration or signature handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, invalid encoding)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// BLS pairing check failed
    #[error("BLS pairing check failed")]
    BlsPairingFailed,

    /// Cannot aggregate an empty list of signatures
    #[error("Cannot aggregate empty signature list")]
    EmptyAggregation,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch {
        expected: Address,
        actual: Address,
    },

    /// Public key bytes are malformed, off-curve, or a zero/identity point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(&'static str),

    /// ECDSA key does not hash to the registering identity
    #[error("Key owner mismatch: key belongs to {derived:?}, not {owner:?}")]
    KeyOwnerMismatch { owner: Address, derived: Address },

    /// Aggregate key arrived without a valid proof of possession
    #[error("Invalid proof of possession")]
    InvalidProofOfPossession,

    /// Identity already has a key on file
    #[error("Key already registered for {0:?}")]
    KeyAlreadyRegistered(Address),

    /// Public key is already bound to another identity
    #[error("Key already in use by {0:?}")]
    KeyInUse(Address),

    /// Identity has no key on file
    #[error("No key registered for {0:?}")]
    KeyNotRegistered(Address),
}

//! # Domain Errors
//!
//! One error type for every bridge operation. Component errors fold in via
//! `#[from]`; [`BridgeError::kind`] tells an off-chain coordinator whether to
//! fix the request, wait, or give up.

use super::config::ConfigError;
use sb_01_signature_verification::SignatureError;
use sb_02_message_inbox::InboxError;
use sb_03_operator_registry::RegistryError;
use shared_types::{Address, Amount, LedgerError};
use thiserror::Error;

/// Rejection taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Null or zero fields, malformed lengths, out-of-range parameters.
    InputValidation,
    /// The request conflicts with current state (already used, not ready, ...).
    StateConflict,
    /// Caller may not perform the operation.
    Authorization,
    /// Not enough stake, fee, value or signatures.
    Economic,
    /// A signature or key failed verification.
    Cryptographic,
}

impl ErrorKind {
    /// Label used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputValidation => "input_validation",
            ErrorKind::StateConflict => "state_conflict",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Economic => "economic",
            ErrorKind::Cryptographic => "cryptographic",
        }
    }
}

/// Bridge error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// Deposit amount is zero.
    #[error("Deposit amount must be non-zero")]
    ZeroAmount,

    /// Secret hash is all zero.
    #[error("Secret hash must not be null")]
    NullSecretHash,

    /// Destination address is all zero.
    #[error("Destination address must not be null")]
    NullDestinationAddress,

    /// Attached value does not cover the fee.
    #[error("Insufficient value: attached {provided}, required {required}")]
    InsufficientValue { provided: Amount, required: Amount },

    /// Attached value does not match the stake being bonded.
    #[error("Attached value {attached} does not match expected {expected}")]
    StakeValueMismatch { expected: Amount, attached: Amount },

    /// Bridge is paused.
    #[error("Bridge is paused")]
    Paused,

    /// Bridge is not paused.
    #[error("Bridge is not paused")]
    NotPaused,

    /// No destination bridge configured.
    #[error("Destination bridge not set")]
    DestinationBridgeNotSet,

    /// Nonce was already dispatched.
    #[error("Nonce already used: {0}")]
    NonceAlreadyUsed(u64),

    /// Fewer signers than the quorum requires.
    #[error("Insufficient signers: provided {provided}, required {required}")]
    InsufficientSigners { provided: usize, required: usize },

    /// More signers than there are active operators.
    #[error("Too many signers: provided {provided}, active {active}")]
    TooManySigners { provided: usize, active: usize },

    /// Named signer is not an active operator.
    #[error("Signer is not an active operator: {0:?}")]
    InactiveSigner(Address),

    /// Same signer named twice.
    #[error("Duplicate signer: {0:?}")]
    DuplicateSigner(Address),

    /// Signature blob does not prove every named signer.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Caller is not the owner.
    #[error("Caller is not the owner: {0:?}")]
    NotOwner(Address),

    /// Caller is not the pending owner.
    #[error("Caller is not the pending owner: {0:?}")]
    NotPendingOwner(Address),

    /// Null address where an identity is required.
    #[error("Address must not be null")]
    ZeroAddress,

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Inbox(#[from] InboxError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Classify the rejection.
    pub fn kind(&self) -> ErrorKind {
        use ErrorKind::*;

        match self {
            BridgeError::ZeroAmount
            | BridgeError::NullSecretHash
            | BridgeError::NullDestinationAddress
            | BridgeError::TooManySigners { .. }
            | BridgeError::DuplicateSigner(_)
            | BridgeError::ZeroAddress
            | BridgeError::Config(_) => InputValidation,

            BridgeError::Paused
            | BridgeError::NotPaused
            | BridgeError::DestinationBridgeNotSet
            | BridgeError::NonceAlreadyUsed(_) => StateConflict,

            BridgeError::InactiveSigner(_)
            | BridgeError::NotOwner(_)
            | BridgeError::NotPendingOwner(_) => Authorization,

            BridgeError::InsufficientValue { .. }
            | BridgeError::StakeValueMismatch { .. }
            | BridgeError::InsufficientSigners { .. }
            | BridgeError::Ledger(_) => Economic,

            BridgeError::SignatureVerificationFailed => Cryptographic,

            BridgeError::Signature(e) => signature_kind(e),
            BridgeError::Registry(e) => registry_kind(e),
            BridgeError::Inbox(e) => inbox_kind(e),
        }
    }
}

fn signature_kind(error: &SignatureError) -> ErrorKind {
    match error {
        SignatureError::KeyAlreadyRegistered(_)
        | SignatureError::KeyInUse(_)
        | SignatureError::KeyNotRegistered(_) => ErrorKind::StateConflict,
        SignatureError::InvalidFormat
        | SignatureError::InvalidPublicKey(_)
        | SignatureError::EmptyAggregation => ErrorKind::InputValidation,
        _ => ErrorKind::Cryptographic,
    }
}

fn registry_kind(error: &RegistryError) -> ErrorKind {
    match error {
        RegistryError::InsufficientStake { .. } | RegistryError::Overflow => ErrorKind::Economic,
        RegistryError::InvalidMinimumStake
        | RegistryError::InvalidQuorumBps(_)
        | RegistryError::InvalidSlashBps(_)
        | RegistryError::InvalidOperatorCap
        | RegistryError::InvalidFraudProof
        | RegistryError::ZeroAddress => ErrorKind::InputValidation,
        _ => ErrorKind::StateConflict,
    }
}

fn inbox_kind(error: &InboxError) -> ErrorKind {
    match error {
        InboxError::NullRecipient
        | InboxError::DeadlineOutOfRange { .. }
        | InboxError::ZeroAddress => ErrorKind::InputValidation,
        InboxError::InsufficientFee { .. }
        | InboxError::InsufficientFeePool { .. }
        | InboxError::Overflow => ErrorKind::Economic,
        InboxError::NotSender | InboxError::UnauthorizedConsumer(_) => ErrorKind::Authorization,
        InboxError::MessageNotFound(_)
        | InboxError::MessageAlreadyExists(_)
        | InboxError::AlreadyConsumed
        | InboxError::AlreadyCancelled
        | InboxError::NotExpired { .. } => ErrorKind::StateConflict,
    }
}

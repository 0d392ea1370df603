//! # Domain Errors

use shared_types::{Address, Amount, BlockHeight};
use thiserror::Error;

/// Registry error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is already an active operator.
    #[error("Operator already active: {0:?}")]
    AlreadyActive(Address),

    /// Caller is unbonding and must withdraw first.
    #[error("Withdrawal already pending for {0:?}")]
    WithdrawalPending(Address),

    /// Stake below the configured minimum.
    #[error("Insufficient stake: provided {provided}, minimum {minimum}")]
    InsufficientStake { provided: Amount, minimum: Amount },

    /// Active-operator cap reached.
    #[error("Operator cap reached ({cap})")]
    OperatorCapReached { cap: usize },

    /// Caller has no verification key on file.
    #[error("No verification key registered for {0:?}")]
    KeyNotRegistered(Address),

    /// Caller is not an active operator.
    #[error("Operator not active: {0:?}")]
    NotActive(Address),

    /// Nothing to withdraw.
    #[error("No pending withdrawal for {0:?}")]
    NoPendingWithdrawal(Address),

    /// Unbonding period has not elapsed.
    #[error("Withdrawal not ready: unlocks at {unlock_height}, current height {height}")]
    WithdrawalNotReady {
        unlock_height: BlockHeight,
        height: BlockHeight,
    },

    /// Target of a slash never registered.
    #[error("Operator never registered: {0:?}")]
    NeverRegistered(Address),

    /// Fraud proof rejected by the verifier.
    #[error("Invalid fraud proof")]
    InvalidFraudProof,

    /// Operator holds no slashable balance.
    #[error("Nothing to slash for {0:?}")]
    NothingToSlash(Address),

    /// Minimum stake must be positive.
    #[error("Minimum stake must be greater than zero")]
    InvalidMinimumStake,

    /// Quorum outside 1..=10_000 bps.
    #[error("Quorum bps out of range: {0}")]
    InvalidQuorumBps(u32),

    /// Slash outside 0..=5_000 bps.
    #[error("Slash bps out of range: {0}")]
    InvalidSlashBps(u32),

    /// Operator cap must be at least one.
    #[error("Operator cap must be at least 1")]
    InvalidOperatorCap,

    /// Null address where an identity is required.
    #[error("Address must not be null")]
    ZeroAddress,

    /// Stake accounting would overflow.
    #[error("Stake accounting overflow")]
    Overflow,

    /// Accounting invariant violated.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

//! # SB-03 Operator Registry & Staking
//!
//! Bonded operators, their stake, unbonding and slashing.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Operator Lifecycle
//!
//! ```text
//!            register                 deregister / slashed below minimum
//! (none) ───────────► Active ────────────────────────────► Unbonding
//!                       ▲                                       │
//!                       └──────── register ◄── complete_withdrawal (after 50_400 blocks)
//! ```
//!
//! ## Accounting Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Stake sum | `total_staked == Σ stake of active operators` |
//! | Active count | `active_count == |{active operators}|` |
//! | Exclusive state | never `active` with a pending withdrawal |
//!
//! Value never moves inside the registry: operations return the `Payout`
//! the caller executes once bookkeeping is final.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::OperatorIdentityProof;
pub use domain::{
    check_invariants, required_signers, slash_penalty, Operator, PendingWithdrawal,
    RegistryConfig, RegistryError, SlashOutcome, MAX_QUORUM_BPS, MAX_SLASH_BPS,
    UNBONDING_PERIOD,
};
pub use ports::{FraudProofVerifier, KeyDirectory, OperatorRegistryApi};
pub use service::OperatorRegistry;

//! # Shared Types Crate
//!
//! Primitive types and cross-subsystem plumbing for the Sentinel bridge.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Identity, hash and amount types used by every
//!   subsystem are defined here.
//! - **Solidity-compatible hashing**: `abi` produces the same 32-byte word
//!   encoding the settlement contracts use, so identifiers computed here match
//!   the ones an off-chain signer computes.
//! - **Value moves last**: the `ValueLedger` port is only touched by the
//!   orchestrator after every bookkeeping step of an operation has succeeded.

pub mod abi;
pub mod context;
pub mod entities;
pub mod errors;
pub mod ledger;

pub use abi::{decode_address, keccak256, AbiEncoder};
pub use context::CallContext;
pub use entities::*;
pub use errors::*;
pub use ledger::{Asset, InMemoryLedger, Payout, ValueLedger};

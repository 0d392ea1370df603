//! # Adapters
//!
//! Reference implementations of the outbound ports.

pub mod fraud_proof;

pub use fraud_proof::OperatorIdentityProof;

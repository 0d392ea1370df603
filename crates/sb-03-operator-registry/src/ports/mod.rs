//! # Ports Module

pub mod inbound;
pub mod outbound;

pub use inbound::OperatorRegistryApi;
pub use outbound::{FraudProofVerifier, KeyDirectory};

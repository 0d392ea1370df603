//! # Signature Schemes
//!
//! Concrete implementations of [`SignatureScheme`](crate::ports::inbound::SignatureScheme).

mod aggregate;
mod recoverable;

pub use aggregate::AggregateSignatureVerifier;
pub use recoverable::RecoverableSignatureVerifier;

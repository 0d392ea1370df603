//! # Domain Layer
//!
//! Pure cryptographic logic for signature verification.

pub mod blob;
pub mod bls;
pub mod ecdsa;
pub mod entities;
pub mod errors;

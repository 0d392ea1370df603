//! # Domain Module
//!
//! Core domain types for the operator registry.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod quorum;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::check_invariants;
pub use quorum::{required_signers, slash_penalty};
pub use value_objects::*;

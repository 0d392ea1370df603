//! # Outbound Ports
//!
//! What the registry needs from its collaborators.

use shared_types::Address;

/// Lookup of verification keys on file.
///
/// Registration requires the operator to have registered a key first.
pub trait KeyDirectory {
    /// Whether `operator` has a verification key on file.
    fn has_key(&self, operator: &Address) -> bool;
}

/// Validation of fraud proofs submitted with a slash.
pub trait FraudProofVerifier: Send + Sync {
    /// Whether `proof` establishes misbehaviour by `operator`.
    fn verify(&self, operator: &Address, proof: &[u8]) -> bool;
}

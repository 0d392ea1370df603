//! Placeholder fraud-proof check.
//!
//! Accepts a proof only if it is the 32-byte ABI encoding of the accused
//! operator's own address. This is a format check, not evidence of fraud:
//! it stands in until a dispute game or validity proof is designed.

use crate::ports::outbound::FraudProofVerifier;
use shared_types::{decode_address, Address};

/// Reference fraud-proof verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorIdentityProof;

impl OperatorIdentityProof {
    /// Build the proof this verifier accepts for `operator`.
    pub fn encode(operator: &Address) -> Vec<u8> {
        shared_types::AbiEncoder::new().address(operator).finish()
    }
}

impl FraudProofVerifier for OperatorIdentityProof {
    fn verify(&self, operator: &Address, proof: &[u8]) -> bool {
        decode_address(proof).is_some_and(|decoded| decoded == *operator)
    }
}

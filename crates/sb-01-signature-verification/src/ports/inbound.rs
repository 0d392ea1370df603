//! # Inbound Ports (Driving Ports / API)
//!
//! The capability the bridge programs against. A concrete scheme is chosen
//! once, when the bridge is constructed.

use crate::domain::entities::SchemeKind;
use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash};

/// Per-operator key registry plus quorum signature verification.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureScheme: Send + Sync {
    /// Which signature family this scheme accepts.
    fn kind(&self) -> SchemeKind;

    /// Length of one signature record in a blob.
    fn record_len(&self) -> usize;

    /// Exact blob length expected for `signer_count` signers.
    fn blob_len(&self, signer_count: usize) -> usize {
        match self.kind() {
            SchemeKind::Recoverable => self.record_len() * signer_count,
            SchemeKind::Aggregate => self.record_len(),
        }
    }

    /// Register `key_material` for `owner`.
    ///
    /// # Errors
    /// - `KeyAlreadyRegistered` if `owner` already has a key
    /// - `InvalidPublicKey` for malformed, zero, or off-curve keys
    /// - `KeyOwnerMismatch` / `InvalidProofOfPossession` when the material
    ///   does not belong to `owner`
    fn register_key(&mut self, owner: Address, key_material: &[u8]) -> Result<(), SignatureError>;

    /// Remove the key on file for `owner`.
    ///
    /// Callers gate this behind the administrator check.
    fn remove_key(&mut self, owner: &Address) -> Result<(), SignatureError>;

    /// Whether `owner` has a key on file.
    fn has_key(&self, owner: &Address) -> bool;

    /// Whether `blob` proves that every address in `signers` signed `digest`.
    ///
    /// False on any length error, unregistered signer, bad signature, or
    /// signer mismatch. Never errors.
    fn verify(&self, digest: &Hash, blob: &[u8], signers: &[Address]) -> bool;
}

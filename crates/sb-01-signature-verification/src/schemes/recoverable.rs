//! Recoverable (ECDSA secp256k1) scheme.

use crate::domain::blob::split_records;
use crate::domain::ecdsa::{address_from_pubkey, parse_public_key, EcdsaVerifier};
use crate::domain::entities::{EcdsaPublicKey, EcdsaSignature, SchemeKind, ECDSA_RECORD_LEN};
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureScheme;
use shared_types::{short_hex, Address, Hash};
use std::collections::HashMap;
use tracing::{debug, info};

/// One 65-byte `r || s || v` record per signer, checked in parallel.
#[derive(Debug, Default)]
pub struct RecoverableSignatureVerifier {
    keys: HashMap<Address, EcdsaPublicKey>,
    verifier: EcdsaVerifier,
}

impl RecoverableSignatureVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered key for `owner`.
    pub fn key_of(&self, owner: &Address) -> Option<&EcdsaPublicKey> {
        self.keys.get(owner)
    }
}

impl SignatureScheme for RecoverableSignatureVerifier {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Recoverable
    }

    fn record_len(&self) -> usize {
        ECDSA_RECORD_LEN
    }

    fn register_key(&mut self, owner: Address, key_material: &[u8]) -> Result<(), SignatureError> {
        if self.keys.contains_key(&owner) {
            return Err(SignatureError::KeyAlreadyRegistered(owner));
        }
        let key = parse_public_key(key_material)?;
        let derived = address_from_pubkey(&key);
        if derived != owner {
            return Err(SignatureError::KeyOwnerMismatch { owner, derived });
        }

        self.keys.insert(owner, key);
        info!("[sb-01] ECDSA key registered for {}", short_hex(&owner));
        Ok(())
    }

    fn remove_key(&mut self, owner: &Address) -> Result<(), SignatureError> {
        self.keys
            .remove(owner)
            .ok_or(SignatureError::KeyNotRegistered(*owner))?;
        info!("[sb-01] ECDSA key removed for {}", short_hex(owner));
        Ok(())
    }

    fn has_key(&self, owner: &Address) -> bool {
        self.keys.contains_key(owner)
    }

    fn verify(&self, digest: &Hash, blob: &[u8], signers: &[Address]) -> bool {
        let Some(records) = split_records(blob, ECDSA_RECORD_LEN, signers.len()) else {
            debug!(
                "[sb-01] blob length {} does not fit {} signers",
                blob.len(),
                signers.len()
            );
            return false;
        };

        let mut batch = Vec::with_capacity(signers.len());
        for (record, signer) in records.into_iter().zip(signers) {
            let Some(key) = self.keys.get(signer) else {
                debug!("[sb-01] no key on file for {}", short_hex(signer));
                return false;
            };
            let Ok(signature) = EcdsaSignature::from_slice(record) else {
                return false;
            };
            batch.push((signature, *signer, key.clone()));
        }

        self.verifier.batch_verify_signers(digest, &batch)
    }
}

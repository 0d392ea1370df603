//! Aggregate (BLS12-381 min-sig) scheme.

use crate::domain::bls::{fast_aggregate_verify, parse_key_material};
use crate::domain::entities::{
    BlsPublicKey, SchemeKind, BLS_PUBLIC_KEY_LEN, BLS_SIGNATURE_LEN,
};
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureScheme;
use shared_types::{short_hex, Address, Hash};
use std::collections::HashMap;
use tracing::{debug, info};

/// One 48-byte aggregate signature for the whole signer set.
/// A public key is bound to at most one identity.
#[derive(Debug, Default)]
pub struct AggregateSignatureVerifier {
    keys: HashMap<Address, BlsPublicKey>,
    owners: HashMap<[u8; BLS_PUBLIC_KEY_LEN], Address>,
}

impl AggregateSignatureVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered key for `owner`.
    pub fn key_of(&self, owner: &Address) -> Option<&BlsPublicKey> {
        self.keys.get(owner)
    }
}

impl SignatureScheme for AggregateSignatureVerifier {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Aggregate
    }

    fn record_len(&self) -> usize {
        BLS_SIGNATURE_LEN
    }

    fn register_key(&mut self, owner: Address, key_material: &[u8]) -> Result<(), SignatureError> {
        if self.keys.contains_key(&owner) {
            return Err(SignatureError::KeyAlreadyRegistered(owner));
        }
        let key = parse_key_material(key_material)?;
        if let Some(holder) = self.owners.get(&key.bytes) {
            return Err(SignatureError::KeyInUse(*holder));
        }

        self.owners.insert(key.bytes, owner);
        self.keys.insert(owner, key);
        info!("[sb-01] BLS key registered for {}", short_hex(&owner));
        Ok(())
    }

    fn remove_key(&mut self, owner: &Address) -> Result<(), SignatureError> {
        let key = self
            .keys
            .remove(owner)
            .ok_or(SignatureError::KeyNotRegistered(*owner))?;
        self.owners.remove(&key.bytes);
        info!("[sb-01] BLS key removed for {}", short_hex(owner));
        Ok(())
    }

    fn has_key(&self, owner: &Address) -> bool {
        self.keys.contains_key(owner)
    }

    fn verify(&self, digest: &Hash, blob: &[u8], signers: &[Address]) -> bool {
        if signers.is_empty() || blob.len() != BLS_SIGNATURE_LEN {
            debug!("[sb-01] aggregate blob rejected: {} bytes", blob.len());
            return false;
        }

        let mut public_keys = Vec::with_capacity(signers.len());
        for signer in signers {
            match self.keys.get(signer) {
                Some(key) => public_keys.push(key.clone()),
                None => {
                    debug!("[sb-01] no key on file for {}", short_hex(signer));
                    return false;
                }
            }
        }

        fast_aggregate_verify(digest, blob, &public_keys)
    }
}

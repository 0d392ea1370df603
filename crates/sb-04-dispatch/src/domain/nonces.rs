//! # Nonce Set
//!
//! Dispatched nonces. Insert-only: nothing removes a nonce once used.

use std::collections::HashSet;

/// Append-only set of used dispatch nonces.
#[derive(Clone, Debug, Default)]
pub struct NonceSet {
    used: HashSet<u64>,
}

impl NonceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, nonce: u64) -> bool {
        self.used.contains(&nonce)
    }

    /// Mark `nonce` used. Returns false if it already was.
    pub fn insert(&mut self, nonce: u64) -> bool {
        self.used.insert(nonce)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

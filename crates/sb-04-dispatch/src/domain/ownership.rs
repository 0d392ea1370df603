//! # Ownership
//!
//! Single administrator with a two-step handoff: the current owner nominates,
//! the nominee accepts. Authority only moves on acceptance.

use super::errors::BridgeError;
use shared_types::{is_zero, Address};

/// Administrator identity and any pending handoff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ownership {
    owner: Address,
    pending_owner: Option<Address>,
}

impl Ownership {
    pub fn new(owner: Address) -> Result<Self, BridgeError> {
        if is_zero(&owner) {
            return Err(BridgeError::ZeroAddress);
        }
        Ok(Self {
            owner,
            pending_owner: None,
        })
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn pending_owner(&self) -> Option<&Address> {
        self.pending_owner.as_ref()
    }

    /// Reject unless `caller` is the owner.
    pub fn require_owner(&self, caller: &Address) -> Result<(), BridgeError> {
        if *caller != self.owner {
            return Err(BridgeError::NotOwner(*caller));
        }
        Ok(())
    }

    /// Nominate `new_owner`, replacing any earlier nomination.
    pub fn start_transfer(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), BridgeError> {
        self.require_owner(caller)?;
        if is_zero(&new_owner) {
            return Err(BridgeError::ZeroAddress);
        }
        self.pending_owner = Some(new_owner);
        Ok(())
    }

    /// Complete the handoff. Returns the previous owner.
    pub fn accept(&mut self, caller: &Address) -> Result<Address, BridgeError> {
        if self.pending_owner != Some(*caller) {
            return Err(BridgeError::NotPendingOwner(*caller));
        }
        let previous = self.owner;
        self.owner = *caller;
        self.pending_owner = None;
        Ok(previous)
    }
}

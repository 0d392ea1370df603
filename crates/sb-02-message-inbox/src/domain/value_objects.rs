//! # Domain Value Objects
//!
//! Message status machine and inbox configuration.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, BlockHeight, ChainId};

/// Earliest deadline a message may carry, relative to the send height.
pub const MIN_DEADLINE_OFFSET: BlockHeight = 100;

/// Latest deadline a message may carry, relative to the send height.
pub const MAX_DEADLINE_OFFSET: BlockHeight = 50_400;

/// Message state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    /// Stored, fee escrowed, awaiting consumption or cancellation.
    #[default]
    Pending,
    /// Delivered to the destination chain.
    Consumed,
    /// Withdrawn by the sender after the deadline; fee refunded.
    Cancelled,
}

impl MessageStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Consumed) | (Self::Pending, Self::Cancelled)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Consumed | Self::Cancelled)
    }
}

/// Inbox parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Chain id hashed into every message id.
    pub chain_id: ChainId,
    /// Smallest fee a sender must attach.
    pub min_fee: Amount,
}

impl InboxConfig {
    /// Create a config.
    pub fn new(chain_id: ChainId, min_fee: Amount) -> Self {
        Self { chain_id, min_fee }
    }

    /// Inclusive deadline window for a message sent at `height`.
    pub fn deadline_window(height: BlockHeight) -> (BlockHeight, BlockHeight) {
        (
            height.saturating_add(MIN_DEADLINE_OFFSET),
            height.saturating_add(MAX_DEADLINE_OFFSET),
        )
    }
}

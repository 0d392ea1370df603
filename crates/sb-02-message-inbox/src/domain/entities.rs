//! # Domain Entities
//!
//! Outbound messages and the shapes exchanged with callers.

use super::value_objects::MessageStatus;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, BlockHeight, Bytes32, Hash};

/// Message identifier (keccak256 over the message fields and a counter).
pub type MessageId = Hash;

/// A message queued for the destination chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1ToL2Message {
    /// Identity that sent (and may cancel) the message.
    pub sender: Address,
    /// Destination-chain recipient.
    pub recipient: Bytes32,
    /// Opaque content hash.
    pub content: Hash,
    /// Hashlock the destination chain releases against.
    pub secret_hash: Hash,
    /// Fee escrowed with the message.
    pub fee: Amount,
    /// Height after which the sender may cancel.
    pub deadline: BlockHeight,
    /// Current state.
    pub status: MessageStatus,
}

impl L1ToL2Message {
    /// Whether cancellation is allowed at `height`.
    pub fn is_expired(&self, height: BlockHeight) -> bool {
        height > self.deadline
    }
}

/// Parameters for sending a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendParams {
    /// Sending identity.
    pub sender: Address,
    /// Destination-chain recipient.
    pub recipient: Bytes32,
    /// Opaque content hash.
    pub content: Hash,
    /// Hashlock.
    pub secret_hash: Hash,
    /// Attached fee.
    pub fee: Amount,
    /// Cancellation deadline.
    pub deadline: BlockHeight,
}

/// What the destination chain receives when a message is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumedMessage {
    pub recipient: Bytes32,
    pub content: Hash,
    pub secret_hash: Hash,
}

impl From<&L1ToL2Message> for ConsumedMessage {
    fn from(msg: &L1ToL2Message) -> Self {
        Self {
            recipient: msg.recipient,
            content: msg.content,
            secret_hash: msg.secret_hash,
        }
    }
}

//! # Inbound Ports
//!
//! API trait defining what the inbox can do.

use crate::domain::{ConsumedMessage, InboxError, L1ToL2Message, MessageId, SendParams};
use shared_types::{Address, BlockHeight, Payout};

/// Message inbox API - inbound port.
pub trait MessageInboxApi: Send + Sync {
    /// Check a send without storing anything.
    fn validate_send(&self, params: &SendParams, height: BlockHeight) -> Result<(), InboxError>;

    /// Store a message and escrow its fee.
    fn send(&mut self, params: SendParams, height: BlockHeight) -> Result<MessageId, InboxError>;

    /// Cancel an expired message; returns the fee refund owed to the sender.
    fn cancel(
        &mut self,
        caller: &Address,
        id: &MessageId,
        height: BlockHeight,
    ) -> Result<Payout, InboxError>;

    /// Deliver a message to the destination chain.
    fn consume(&mut self, caller: &Address, id: &MessageId)
        -> Result<ConsumedMessage, InboxError>;

    /// Whether the message exists and is still pending.
    fn is_pending(&self, id: &MessageId) -> bool;

    /// Look up a message.
    fn get(&self, id: &MessageId) -> Option<&L1ToL2Message>;
}

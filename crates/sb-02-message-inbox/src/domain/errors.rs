//! # Domain Errors

use super::entities::MessageId;
use shared_types::{Address, Amount, BlockHeight};
use thiserror::Error;

/// Inbox error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InboxError {
    /// Recipient is the null value.
    #[error("Recipient must not be null")]
    NullRecipient,

    /// Attached fee below the minimum.
    #[error("Insufficient fee: provided {provided}, required {required}")]
    InsufficientFee { provided: Amount, required: Amount },

    /// Deadline outside `[height + 100, height + 50_400]`.
    #[error("Deadline {deadline} outside [{min}, {max}]")]
    DeadlineOutOfRange {
        deadline: BlockHeight,
        min: BlockHeight,
        max: BlockHeight,
    },

    /// No message with this id.
    #[error("Message not found: {0:?}")]
    MessageNotFound(MessageId),

    /// A message is already stored under this id.
    #[error("Message already exists: {0:?}")]
    MessageAlreadyExists(MessageId),

    /// Message was already consumed.
    #[error("Message already consumed")]
    AlreadyConsumed,

    /// Message was already cancelled.
    #[error("Message already cancelled")]
    AlreadyCancelled,

    /// Only the sender may cancel.
    #[error("Caller is not the message sender")]
    NotSender,

    /// Cancellation before the deadline has passed.
    #[error("Message not expired: deadline {deadline}, height {height}")]
    NotExpired {
        deadline: BlockHeight,
        height: BlockHeight,
    },

    /// Caller is not an authorized consumer.
    #[error("Unauthorized consumer: {0:?}")]
    UnauthorizedConsumer(Address),

    /// Null address where an identity is required.
    #[error("Address must not be null")]
    ZeroAddress,

    /// Fee pool holds less than requested.
    #[error("Insufficient fee pool: available {available}, requested {requested}")]
    InsufficientFeePool { available: Amount, requested: Amount },

    /// Counter or fee accounting would overflow.
    #[error("Arithmetic overflow")]
    Overflow,
}

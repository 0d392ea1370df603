//! # SB-02 Message Inbox
//!
//! Outbound queue of messages addressed to the destination chain.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Deterministic message identifiers that never collide, even for
//!   byte-identical payloads (a monotonic counter is hashed in)
//! - Escrow of the message fee while a message is pending
//! - Cancellation by the sender once the deadline has passed
//! - Consumption by authorized relayers, returning the
//!   `(recipient, content, secret_hash)` triple for the destination chain
//!
//! ## Lifecycle
//!
//! ```text
//! send ──► Pending ──consume──► Consumed   (fee → withdrawable pool)
//!              └────cancel───► Cancelled  (fee → refunded to sender)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! sb-02-message-inbox/
//! ├── domain/     # Message, status, id derivation, errors
//! ├── ports/      # MessageInboxApi
//! └── service.rs  # MessageInbox
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    compute_message_id, ConsumedMessage, InboxConfig, InboxError, L1ToL2Message, MessageId,
    MessageStatus, SendParams, MAX_DEADLINE_OFFSET, MIN_DEADLINE_OFFSET,
};
pub use ports::MessageInboxApi;
pub use service::MessageInbox;

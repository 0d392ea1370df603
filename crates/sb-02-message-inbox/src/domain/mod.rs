//! # Domain Module
//!
//! Core domain types for the message inbox.

pub mod entities;
pub mod errors;
pub mod message_id;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use message_id::compute_message_id;
pub use value_objects::*;

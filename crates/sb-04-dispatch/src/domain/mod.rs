//! # Domain Layer
//!
//! Attestation payload hashing, bridge configuration, the error taxonomy,
//! audit events and the small stores the orchestrator owns directly.

pub mod config;
pub mod errors;
pub mod events;
pub mod nonces;
pub mod ownership;
pub mod payload;

pub use config::{BridgeConfig, ConfigError, DEFAULT_BRIDGE_ADDRESS};
pub use errors::{BridgeError, ErrorKind};
pub use events::{BridgeEvent, ConfigParameter, EventLog};
pub use nonces::NonceSet;
pub use ownership::Ownership;
pub use payload::{
    typed_data_digest, DepositPayload, Eip712Domain, DEPOSIT_PAYLOAD_TYPE, EIP712_DOMAIN_TYPE,
};

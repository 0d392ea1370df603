//! # Dispatch Orchestrator (SB-04)
//!
//! The bridge itself: owns every store of the trust layer and relays
//! quorum-attested deposits into the outbound message inbox.
//!
//! ## Dispatch Flow
//!
//! ```text
//! caller ──→ Bridge::verify_and_dispatch
//!              ├─ payload, fee, pause, destination checks
//!              ├─ nonce unused
//!              ├─ OperatorRegistry: quorum size, signers active and unique
//!              ├─ SignatureScheme: blob proves every signer over the typed digest
//!              ├─ nonce marked used
//!              ├─ MessageInbox: message stored, fee escrowed
//!              └─ excess value refunded
//! ```
//!
//! ## Effects Ordering
//!
//! Each operation validates fully, then updates bookkeeping and events, and
//! only then moves value out of custody. A rejected call leaves every store
//! and every balance as it was.

pub mod adapters;
pub mod domain;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use adapters::SchemeKeys;
pub use domain::{
    typed_data_digest, BridgeConfig, BridgeError, BridgeEvent, ConfigError, ConfigParameter,
    DepositPayload, Eip712Domain, ErrorKind, EventLog, NonceSet, Ownership,
    DEFAULT_BRIDGE_ADDRESS, DEPOSIT_PAYLOAD_TYPE, EIP712_DOMAIN_TYPE,
};
pub use service::{Bridge, BridgeState};

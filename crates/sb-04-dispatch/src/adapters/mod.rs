//! # Adapters Layer
//!
//! Bridges between the signature scheme and the registry's outbound ports.

pub mod key_directory;

pub use key_directory::SchemeKeys;

//! # Core Entities
//!
//! Primitive identity, hash and amount types.

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash (keccak256).
pub type Hash = [u8; 32];

/// An opaque 32-byte value (destination-chain addresses, secret hashes).
pub type Bytes32 = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Token or native-currency amount in base units.
pub type Amount = u128;

/// Block height of the settlement ledger.
pub type BlockHeight = u64;

/// EIP-155 chain identifier.
pub type ChainId = u64;

/// The null address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// The null 32-byte value.
pub const ZERO_BYTES32: Bytes32 = [0u8; 32];

/// Basis-point denominator (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Returns true when every byte is zero.
pub fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// Abbreviated hex rendering (`0xabcd…`) used in log lines.
pub fn short_hex(bytes: &[u8]) -> String {
    let len = bytes.len().min(4);
    format!("0x{}…", hex::encode(&bytes[..len]))
}

//! Bridge configuration with validation.
//!
//! Every field has a default, so a JSON document only needs the values it
//! overrides. Identities are hex strings (`"0x…"` prefix optional).

use super::payload::Eip712Domain;
use sb_02_message_inbox::{InboxConfig, MAX_DEADLINE_OFFSET, MIN_DEADLINE_OFFSET};
use sb_03_operator_registry::{RegistryConfig, RegistryError};
use serde::{Deserialize, Serialize};
use shared_types::{is_zero, Address, Amount, Asset, BlockHeight, Bytes32, ChainId};

/// Identity the bridge holds custody under when none is configured.
pub const DEFAULT_BRIDGE_ADDRESS: Address = [
    0x5e, 0x47, 0x1e, 0x1b, 0x21, 0xd6, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01,
];

/// Main bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Signing domain name
    pub name: String,
    /// Signing domain version
    pub version: String,
    /// Settlement chain id, bound into digests and message ids
    pub chain_id: ChainId,
    /// The bridge's own identity (custody account, verifying contract)
    #[serde(with = "hex_serde")]
    pub address: Address,
    /// Smallest stake an operator may bond
    pub minimum_stake: Amount,
    /// Share of active operators a dispatch needs, in basis points
    pub quorum_bps: u32,
    /// Share of an operator's balance taken per slash, in basis points
    pub slash_bps: u32,
    /// Maximum number of simultaneously active operators
    pub operator_cap: usize,
    /// Fee charged per dispatch, also the inbox minimum fee
    pub message_fee: Amount,
    /// Cancellation window given to dispatched messages
    pub dispatch_deadline_blocks: BlockHeight,
    /// Destination-chain bridge; all-zero means unset and blocks dispatch
    #[serde(with = "hex_serde")]
    pub destination_bridge: Bytes32,
    /// Recipient of slashing penalties; all-zero means the owner
    #[serde(with = "hex_serde")]
    pub treasury: Address,
    /// Asset operators bond stake in
    pub stake_asset: Asset,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: "SentinelBridge".to_string(),
            version: "1".to_string(),
            chain_id: 31337,
            address: DEFAULT_BRIDGE_ADDRESS,
            minimum_stake: 1_000_000_000_000_000_000,
            quorum_bps: 6_667,
            slash_bps: 1_000,
            operator_cap: 100,
            message_fee: 1_000_000_000_000_000,
            dispatch_deadline_blocks: 7_200,
            destination_bridge: [0u8; 32],
            treasury: [0u8; 20],
            stake_asset: Asset::Native,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() || self.version.is_empty() {
            return Err(ConfigError::Invalid("domain name and version required".into()));
        }
        if self.chain_id == 0 {
            return Err(ConfigError::Invalid("chain_id cannot be 0".into()));
        }
        if is_zero(&self.address) {
            return Err(ConfigError::ZeroAddress("address"));
        }
        if self.dispatch_deadline_blocks < MIN_DEADLINE_OFFSET
            || self.dispatch_deadline_blocks > MAX_DEADLINE_OFFSET
        {
            return Err(ConfigError::DispatchDeadline(self.dispatch_deadline_blocks));
        }
        // Treasury is resolved later, so check the registry bounds with a placeholder
        self.registry_config(self.address).validate()?;
        Ok(())
    }

    /// Registry parameters, with `owner` standing in for an unset treasury.
    pub fn registry_config(&self, owner: Address) -> RegistryConfig {
        RegistryConfig {
            minimum_stake: self.minimum_stake,
            quorum_bps: self.quorum_bps,
            slash_bps: self.slash_bps,
            operator_cap: self.operator_cap,
            treasury: if is_zero(&self.treasury) {
                owner
            } else {
                self.treasury
            },
            stake_asset: self.stake_asset,
        }
    }

    pub fn inbox_config(&self) -> InboxConfig {
        InboxConfig::new(self.chain_id, self.message_fee)
    }

    pub fn domain(&self) -> Eip712Domain {
        Eip712Domain {
            name: self.name.clone(),
            version: self.version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.address,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Document could not be parsed
    #[error("config parse error: {0}")]
    Parse(String),
    /// Required identity is null
    #[error("{0} must not be the null address")]
    ZeroAddress(&'static str),
    /// Dispatch deadline outside the inbox deadline window
    #[error(
        "dispatch deadline {0} blocks outside [{min}, {max}]",
        min = MIN_DEADLINE_OFFSET,
        max = MAX_DEADLINE_OFFSET
    )]
    DispatchDeadline(BlockHeight),
    /// Registry parameter out of bounds
    #[error("invalid registry parameter: {0}")]
    Registry(#[from] RegistryError),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Hex serde module for fixed-size identities
mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(digits).map_err(serde::de::Error::custom)?;
        <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
            serde::de::Error::custom(format!("expected {} bytes, got {}", N, bytes.len()))
        })
    }
}

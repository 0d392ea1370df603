//! # Domain Value Objects
//!
//! Registry parameters and their bounds.

use super::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::{is_zero, Address, Amount, Asset, BlockHeight, BPS_DENOMINATOR};

/// Blocks between deregistration and stake release (~7 days at 12s blocks).
pub const UNBONDING_PERIOD: BlockHeight = 50_400;

/// Upper bound on the slash percentage (50%).
pub const MAX_SLASH_BPS: u32 = 5_000;

/// Upper bound on the quorum percentage (100%).
pub const MAX_QUORUM_BPS: u32 = BPS_DENOMINATOR;

/// Registry parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Smallest stake an operator may bond.
    pub minimum_stake: Amount,
    /// Share of active operators whose signatures a dispatch needs.
    pub quorum_bps: u32,
    /// Share of an operator's balance taken per slash.
    pub slash_bps: u32,
    /// Maximum number of simultaneously active operators.
    pub operator_cap: usize,
    /// Recipient of slashing penalties.
    pub treasury: Address,
    /// Asset stake is bonded in. Fixed at construction.
    pub stake_asset: Asset,
}

impl RegistryConfig {
    /// Check every bound.
    pub fn validate(&self) -> Result<(), RegistryError> {
        validate_minimum_stake(self.minimum_stake)?;
        validate_quorum_bps(self.quorum_bps)?;
        validate_slash_bps(self.slash_bps)?;
        validate_operator_cap(self.operator_cap)?;
        if is_zero(&self.treasury) {
            return Err(RegistryError::ZeroAddress);
        }
        Ok(())
    }
}

pub fn validate_minimum_stake(minimum_stake: Amount) -> Result<(), RegistryError> {
    if minimum_stake == 0 {
        return Err(RegistryError::InvalidMinimumStake);
    }
    Ok(())
}

pub fn validate_quorum_bps(quorum_bps: u32) -> Result<(), RegistryError> {
    if quorum_bps == 0 || quorum_bps > MAX_QUORUM_BPS {
        return Err(RegistryError::InvalidQuorumBps(quorum_bps));
    }
    Ok(())
}

pub fn validate_slash_bps(slash_bps: u32) -> Result<(), RegistryError> {
    if slash_bps > MAX_SLASH_BPS {
        return Err(RegistryError::InvalidSlashBps(slash_bps));
    }
    Ok(())
}

pub fn validate_operator_cap(operator_cap: usize) -> Result<(), RegistryError> {
    if operator_cap == 0 {
        return Err(RegistryError::InvalidOperatorCap);
    }
    Ok(())
}

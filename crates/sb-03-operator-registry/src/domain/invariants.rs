//! # Domain Invariants
//!
//! Accounting rules that hold in every reachable registry state.

use super::entities::{Operator, PendingWithdrawal};
use super::errors::RegistryError;
use shared_types::{Address, Amount};
use std::collections::HashMap;

/// Invariant: total staked equals the sum of active stakes.
pub fn invariant_stake_sum<'a>(
    operators: impl IntoIterator<Item = &'a Operator>,
    total_staked: Amount,
) -> Result<(), RegistryError> {
    let sum = operators
        .into_iter()
        .filter(|op| op.active)
        .try_fold(0u128, |acc, op| acc.checked_add(op.stake))
        .ok_or(RegistryError::Overflow)?;
    if sum != total_staked {
        return Err(RegistryError::InvariantViolation(format!(
            "total_staked {} != active stake sum {}",
            total_staked, sum
        )));
    }
    Ok(())
}

/// Invariant: active count equals the number of active records.
pub fn invariant_active_count<'a>(
    operators: impl IntoIterator<Item = &'a Operator>,
    active_count: usize,
) -> Result<(), RegistryError> {
    let counted = operators.into_iter().filter(|op| op.active).count();
    if counted != active_count {
        return Err(RegistryError::InvariantViolation(format!(
            "active_count {} != {} active records",
            active_count, counted
        )));
    }
    Ok(())
}

/// Invariant: no operator is both active and unbonding.
pub fn invariant_exclusive_state<'a>(
    operators: impl IntoIterator<Item = &'a Operator>,
    pending: &HashMap<Address, PendingWithdrawal>,
) -> Result<(), RegistryError> {
    match operators
        .into_iter()
        .find(|op| op.active && pending.contains_key(&op.address))
    {
        Some(op) => Err(RegistryError::InvariantViolation(format!(
            "operator {} is active with a pending withdrawal",
            shared_types::short_hex(&op.address)
        ))),
        None => Ok(()),
    }
}

/// Check all registry invariants.
pub fn check_invariants(
    operators: &HashMap<Address, Operator>,
    pending: &HashMap<Address, PendingWithdrawal>,
    total_staked: Amount,
    active_count: usize,
) -> Result<(), RegistryError> {
    invariant_stake_sum(operators.values(), total_staked)?;
    invariant_active_count(operators.values(), active_count)?;
    invariant_exclusive_state(operators.values(), pending)
}

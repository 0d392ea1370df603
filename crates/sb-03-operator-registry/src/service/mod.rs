//! Operator Registry Service - stake accounting and operator lifecycle
//!
//! # Architecture
//! - Validate first, mutate second: a rejected call leaves every store as it was
//! - Custody transfers are returned as `Payout`s, never executed here
//! - Collaborators (`KeyDirectory`, `FraudProofVerifier`) are passed per call

use crate::domain::value_objects::{
    validate_minimum_stake, validate_operator_cap, validate_quorum_bps, validate_slash_bps,
};
use crate::domain::{
    check_invariants, required_signers, slash_penalty, Operator, PendingWithdrawal,
    RegistryConfig, RegistryError, SlashOutcome, UNBONDING_PERIOD,
};
use crate::ports::{FraudProofVerifier, KeyDirectory, OperatorRegistryApi};
use shared_types::{is_zero, short_hex, Address, Amount, BlockHeight, Payout};
use std::collections::HashMap;
use tracing::{info, warn};

/// Operator registry and staking ledger.
#[derive(Debug)]
pub struct OperatorRegistry {
    config: RegistryConfig,
    operators: HashMap<Address, Operator>,
    /// Every address ever registered, first-registration order, no duplicates
    operator_list: Vec<Address>,
    pending: HashMap<Address, PendingWithdrawal>,
    total_staked: Amount,
    active_count: usize,
}

impl OperatorRegistry {
    /// Create an empty registry.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        Ok(Self {
            config,
            operators: HashMap::new(),
            operator_list: Vec::new(),
            pending: HashMap::new(),
            total_staked: 0,
            active_count: 0,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Check a registration without applying it.
    pub fn validate_register<K: KeyDirectory + ?Sized>(
        &self,
        operator: &Address,
        stake: Amount,
        keys: &K,
    ) -> Result<(), RegistryError> {
        if self.is_active(operator) {
            return Err(RegistryError::AlreadyActive(*operator));
        }
        if self.pending.contains_key(operator) {
            return Err(RegistryError::WithdrawalPending(*operator));
        }
        if stake < self.config.minimum_stake {
            return Err(RegistryError::InsufficientStake {
                provided: stake,
                minimum: self.config.minimum_stake,
            });
        }
        if self.active_count >= self.config.operator_cap {
            return Err(RegistryError::OperatorCapReached {
                cap: self.config.operator_cap,
            });
        }
        if !keys.has_key(operator) {
            return Err(RegistryError::KeyNotRegistered(*operator));
        }
        self.total_staked
            .checked_add(stake)
            .ok_or(RegistryError::Overflow)?;
        Ok(())
    }

    /// Bond `stake` for `operator`. The caller has already taken custody.
    ///
    /// A previously deregistered identity re-activates its existing record.
    pub fn register<K: KeyDirectory + ?Sized>(
        &mut self,
        operator: Address,
        stake: Amount,
        height: BlockHeight,
        keys: &K,
    ) -> Result<&Operator, RegistryError> {
        self.validate_register(&operator, stake, keys)?;

        if !self.operators.contains_key(&operator) {
            self.operator_list.push(operator);
        }
        self.operators
            .insert(operator, Operator::new(operator, stake, height));
        self.total_staked += stake;
        self.active_count += 1;

        info!(
            stake,
            active = self.active_count,
            "[sb-03] operator {} registered",
            short_hex(&operator)
        );
        self.debug_check();
        self.operator(&operator)
            .ok_or(RegistryError::NeverRegistered(operator))
    }

    /// Start unbonding: voting weight is removed immediately.
    pub fn deregister(
        &mut self,
        operator: &Address,
        height: BlockHeight,
    ) -> Result<PendingWithdrawal, RegistryError> {
        if self.pending.contains_key(operator) {
            return Err(RegistryError::WithdrawalPending(*operator));
        }
        let stake = match self.operators.get(operator) {
            Some(op) if op.active => op.stake,
            _ => return Err(RegistryError::NotActive(*operator)),
        };

        let withdrawal = self.deactivate(operator, stake, height);
        info!(
            amount = withdrawal.amount,
            unlock_height = withdrawal.unlock_height,
            "[sb-03] operator {} deregistered",
            short_hex(operator)
        );
        self.debug_check();
        Ok(withdrawal)
    }

    /// Check a withdrawal without applying it.
    pub fn validate_complete_withdrawal(
        &self,
        operator: &Address,
        height: BlockHeight,
    ) -> Result<&PendingWithdrawal, RegistryError> {
        let withdrawal = self
            .pending
            .get(operator)
            .ok_or(RegistryError::NoPendingWithdrawal(*operator))?;
        if !withdrawal.is_unlocked(height) {
            return Err(RegistryError::WithdrawalNotReady {
                unlock_height: withdrawal.unlock_height,
                height,
            });
        }
        Ok(withdrawal)
    }

    /// Close an unlocked withdrawal; returns the payout owed to the operator.
    pub fn complete_withdrawal(
        &mut self,
        operator: &Address,
        height: BlockHeight,
    ) -> Result<Payout, RegistryError> {
        self.validate_complete_withdrawal(operator, height)?;
        let withdrawal = self
            .pending
            .remove(operator)
            .ok_or(RegistryError::NoPendingWithdrawal(*operator))?;

        info!(
            amount = withdrawal.amount,
            "[sb-03] withdrawal completed for {}",
            short_hex(operator)
        );
        Ok(Payout::new(*operator, withdrawal.amount))
    }

    /// Check a slash without applying it; returns the slashable balance.
    pub fn validate_slash<F: FraudProofVerifier + ?Sized>(
        &self,
        operator: &Address,
        proof: &[u8],
        verifier: &F,
    ) -> Result<Amount, RegistryError> {
        let record = self
            .operators
            .get(operator)
            .ok_or(RegistryError::NeverRegistered(*operator))?;
        if !verifier.verify(operator, proof) {
            return Err(RegistryError::InvalidFraudProof);
        }
        let balance = if record.active {
            record.stake
        } else {
            self.pending.get(operator).map_or(0, |w| w.amount)
        };
        if balance == 0 {
            return Err(RegistryError::NothingToSlash(*operator));
        }
        Ok(balance)
    }

    /// Penalise `operator`. The penalty is owed to the treasury.
    ///
    /// An active operator left below the minimum stake is deactivated and
    /// its remainder moves into a forced withdrawal. An unbonding operator
    /// is slashed out of its pending withdrawal.
    pub fn slash<F: FraudProofVerifier + ?Sized>(
        &mut self,
        operator: &Address,
        proof: &[u8],
        height: BlockHeight,
        verifier: &F,
    ) -> Result<SlashOutcome, RegistryError> {
        let balance = self.validate_slash(operator, proof, verifier)?;
        let penalty = slash_penalty(balance, self.config.slash_bps);
        let remaining = balance - penalty;

        let mut deactivated = false;
        let mut forced_withdrawal = None;

        if let Some(withdrawal) = self.pending.get_mut(operator) {
            withdrawal.amount = remaining;
        } else if let Some(op) = self.operators.get_mut(operator) {
            op.stake = remaining;
            self.total_staked -= penalty;
            if remaining < self.config.minimum_stake {
                forced_withdrawal = Some(self.deactivate(operator, remaining, height));
                deactivated = true;
            }
        }

        warn!(
            penalty,
            remaining,
            deactivated,
            "[sb-03] operator {} slashed",
            short_hex(operator)
        );
        self.debug_check();
        Ok(SlashOutcome {
            operator: *operator,
            penalty: Payout::new(self.config.treasury, penalty),
            remaining,
            deactivated,
            forced_withdrawal,
        })
    }

    /// Flip an active operator to unbonding with `amount` in custody.
    fn deactivate(
        &mut self,
        operator: &Address,
        amount: Amount,
        height: BlockHeight,
    ) -> PendingWithdrawal {
        if let Some(op) = self.operators.get_mut(operator) {
            op.active = false;
            op.stake = 0;
        }
        self.total_staked -= amount;
        self.active_count -= 1;

        let withdrawal = PendingWithdrawal {
            amount,
            unlock_height: height.saturating_add(UNBONDING_PERIOD),
        };
        self.pending.insert(*operator, withdrawal);
        withdrawal
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_minimum_stake(&mut self, minimum_stake: Amount) -> Result<(), RegistryError> {
        validate_minimum_stake(minimum_stake)?;
        self.config.minimum_stake = minimum_stake;
        Ok(())
    }

    pub fn set_quorum_bps(&mut self, quorum_bps: u32) -> Result<(), RegistryError> {
        validate_quorum_bps(quorum_bps)?;
        self.config.quorum_bps = quorum_bps;
        Ok(())
    }

    pub fn set_slash_bps(&mut self, slash_bps: u32) -> Result<(), RegistryError> {
        validate_slash_bps(slash_bps)?;
        self.config.slash_bps = slash_bps;
        Ok(())
    }

    /// Lowering the cap below the active count only blocks new registrations.
    pub fn set_operator_cap(&mut self, operator_cap: usize) -> Result<(), RegistryError> {
        validate_operator_cap(operator_cap)?;
        self.config.operator_cap = operator_cap;
        Ok(())
    }

    pub fn set_treasury(&mut self, treasury: Address) -> Result<(), RegistryError> {
        if is_zero(&treasury) {
            return Err(RegistryError::ZeroAddress);
        }
        self.config.treasury = treasury;
        Ok(())
    }

    /// Check every accounting invariant.
    pub fn check_invariants(&self) -> Result<(), RegistryError> {
        check_invariants(
            &self.operators,
            &self.pending,
            self.total_staked,
            self.active_count,
        )
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }
}

impl OperatorRegistryApi for OperatorRegistry {
    fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn operator(&self, operator: &Address) -> Option<&Operator> {
        self.operators.get(operator)
    }

    fn operators(&self) -> &[Address] {
        &self.operator_list
    }

    fn active_operators(&self) -> Vec<Address> {
        self.operator_list
            .iter()
            .filter(|addr| self.is_active(addr))
            .copied()
            .collect()
    }

    fn active_count(&self) -> usize {
        self.active_count
    }

    fn total_staked(&self) -> Amount {
        self.total_staked
    }

    fn pending_withdrawal(&self, operator: &Address) -> Option<&PendingWithdrawal> {
        self.pending.get(operator)
    }

    fn required_signers(&self) -> usize {
        required_signers(self.active_count, self.config.quorum_bps)
    }
}

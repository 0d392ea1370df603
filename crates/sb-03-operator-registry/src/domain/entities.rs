//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, BlockHeight, Payout};

/// A bonded identity eligible to co-sign dispatches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub address: Address,
    /// Bonded stake. Zero once the operator stops being active.
    pub stake: Amount,
    /// Whether the operator counts toward quorum.
    pub active: bool,
    /// Height of the latest registration.
    pub registered_at: BlockHeight,
}

impl Operator {
    /// Create a newly active operator.
    pub fn new(address: Address, stake: Amount, registered_at: BlockHeight) -> Self {
        Self {
            address,
            stake,
            active: true,
            registered_at,
        }
    }
}

/// Stake released from voting but still in custody.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWithdrawal {
    pub amount: Amount,
    /// First height at which the funds can be withdrawn.
    pub unlock_height: BlockHeight,
}

impl PendingWithdrawal {
    /// Whether the funds can be withdrawn at `height`.
    pub fn is_unlocked(&self, height: BlockHeight) -> bool {
        height >= self.unlock_height
    }
}

/// Result of a successful slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashOutcome {
    pub operator: Address,
    /// Penalty owed to the treasury.
    pub penalty: Payout,
    /// Balance left after the penalty (stake or pending withdrawal).
    pub remaining: Amount,
    /// Whether this slash deactivated the operator.
    pub deactivated: bool,
    /// Withdrawal opened by deactivation, if any.
    pub forced_withdrawal: Option<PendingWithdrawal>,
}

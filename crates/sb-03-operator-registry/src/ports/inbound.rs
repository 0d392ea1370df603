//! # Inbound Ports
//!
//! Read API over the registry. Mutations live on `OperatorRegistry`
//! itself because they need the outbound ports passed in per call.

use crate::domain::{Operator, PendingWithdrawal, RegistryConfig};
use shared_types::{Address, Amount};

/// Operator registry queries - inbound port.
pub trait OperatorRegistryApi: Send + Sync {
    /// Registry parameters.
    fn config(&self) -> &RegistryConfig;

    /// Record for `operator`, active or not.
    fn operator(&self, operator: &Address) -> Option<&Operator>;

    /// Every address ever registered, in first-registration order.
    fn operators(&self) -> &[Address];

    /// Currently active operators, in first-registration order.
    fn active_operators(&self) -> Vec<Address>;

    /// Whether `operator` currently counts toward quorum.
    fn is_active(&self, operator: &Address) -> bool {
        self.operator(operator).is_some_and(|op| op.active)
    }

    fn active_count(&self) -> usize;

    fn total_staked(&self) -> Amount;

    fn pending_withdrawal(&self, operator: &Address) -> Option<&PendingWithdrawal>;

    /// Signatures a dispatch needs at the current active count.
    fn required_signers(&self) -> usize;
}

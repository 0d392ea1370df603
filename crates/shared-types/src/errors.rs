//! # Error Types
//!
//! Errors raised by the shared value ledger.

use crate::entities::{Address, Amount};
use crate::ledger::Asset;
use thiserror::Error;

/// Errors from value transfers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Source account does not hold enough of the asset.
    #[error("Insufficient {asset} balance for {account:?}: have {available}, need {required}")]
    InsufficientBalance {
        asset: Asset,
        account: Address,
        available: Amount,
        required: Amount,
    },

    /// Crediting the destination would overflow its balance.
    #[error("Balance overflow for {account:?}")]
    Overflow { account: Address },
}

//! # Value Ledger Port
//!
//! Custody of native currency and fungible tokens. The bridge never mutates
//! balances directly; every refund, withdrawal, fee or penalty goes through
//! this port, and only after the operation's own bookkeeping is final.

use crate::entities::{Address, Amount};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Asset a balance is denominated in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The settlement chain's native currency.
    #[default]
    Native,
    /// A fungible token identified by its contract address.
    Token(Address),
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token(addr) => write!(f, "token 0x{}", hex::encode(addr)),
        }
    }
}

/// A value transfer out of bridge custody that an operation implies.
///
/// Components return these instead of moving value themselves; the
/// orchestrator executes them once bookkeeping is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Recipient of the funds.
    pub to: Address,
    /// Amount in the relevant asset's base units.
    pub amount: Amount,
}

impl Payout {
    /// Create a payout.
    pub fn new(to: Address, amount: Amount) -> Self {
        Self { to, amount }
    }
}

/// Balance book the bridge moves value through.
pub trait ValueLedger: Send + Sync {
    /// Balance of `account` in `asset`.
    fn balance_of(&self, asset: Asset, account: &Address) -> Amount;

    /// Move `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    /// * `InsufficientBalance` - `from` holds less than `amount`
    /// * `Overflow` - `to` would exceed `Amount::MAX`
    fn transfer(
        &mut self,
        asset: Asset,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// In-memory balance book.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(Asset, Address), Amount>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `account` out of thin air (genesis allocation, test funding).
    pub fn mint(&mut self, asset: Asset, account: Address, amount: Amount) {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Builder form of [`InMemoryLedger::mint`].
    pub fn with_balance(mut self, asset: Asset, account: Address, amount: Amount) -> Self {
        self.mint(asset, account, amount);
        self
    }
}

impl ValueLedger for InMemoryLedger {
    fn balance_of(&self, asset: Asset, account: &Address) -> Amount {
        self.balances.get(&(asset, *account)).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: Asset,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount == 0 || from == to {
            return Ok(());
        }

        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset,
                account: *from,
                available,
                required: amount,
            });
        }

        let credited = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { account: *to })?;

        self.balances.insert((asset, *from), available - amount);
        self.balances.insert((asset, *to), credited);

        debug!(%asset, amount, "[ledger] transfer applied");
        Ok(())
    }
}

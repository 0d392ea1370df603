//! # Call Context
//!
//! Who is calling, how much native value they attached, and at which height
//! the call executes. Heights are the only clock: deadlines and unbonding are
//! measured in blocks, never wall-clock time.

use crate::entities::{Address, Amount, BlockHeight};
use serde::{Deserialize, Serialize};

/// Execution context for a single bridge operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Identity of the caller.
    pub caller: Address,
    /// Native value attached to the call.
    pub value: Amount,
    /// Current ledger height.
    pub height: BlockHeight,
}

impl CallContext {
    /// A call with no attached value.
    pub fn new(caller: Address, height: BlockHeight) -> Self {
        Self {
            caller,
            value: 0,
            height,
        }
    }

    /// Attach native value to the call.
    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }
}

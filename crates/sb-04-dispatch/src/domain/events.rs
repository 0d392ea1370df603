//! # Audit Events
//!
//! Append-only record of every state change, for off-chain observers.
//! Each event is also mirrored to `tracing`.

use sb_02_message_inbox::MessageId;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, BlockHeight, Bytes32, Hash};
use tracing::info;

/// Parameter changed by an administrative call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigParameter {
    MinimumStake(Amount),
    QuorumBps(u32),
    SlashBps(u32),
    MessageFee(Amount),
    DestinationBridge(Bytes32),
    OperatorCap(usize),
    Treasury(Address),
    ConsumerAuthorized(Address),
    ConsumerRevoked(Address),
}

/// Bridge audit events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeEvent {
    KeyRegistered {
        owner: Address,
    },
    KeyRemoved {
        owner: Address,
    },
    OperatorRegistered {
        operator: Address,
        stake: Amount,
        height: BlockHeight,
    },
    OperatorDeregistered {
        operator: Address,
        height: BlockHeight,
    },
    OperatorSlashed {
        operator: Address,
        penalty: Amount,
        remaining: Amount,
        deactivated: bool,
    },
    WithdrawalInitiated {
        operator: Address,
        amount: Amount,
        unlock_height: BlockHeight,
    },
    WithdrawalCompleted {
        operator: Address,
        amount: Amount,
    },
    DepositVerified {
        source_tx_id: Hash,
        amount: Amount,
        secret_hash: Hash,
        destination_address: Bytes32,
        message_id: MessageId,
    },
    MessageSent {
        message_id: MessageId,
        sender: Address,
        recipient: Bytes32,
        fee: Amount,
        deadline: BlockHeight,
    },
    MessageConsumed {
        message_id: MessageId,
        consumer: Address,
    },
    MessageCancelled {
        message_id: MessageId,
        refund: Amount,
    },
    FeesWithdrawn {
        to: Address,
        amount: Amount,
    },
    ConfigChanged {
        parameter: ConfigParameter,
    },
    OwnershipTransferStarted {
        owner: Address,
        pending_owner: Address,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    Paused {
        by: Address,
    },
    Unpaused {
        by: Address,
    },
}

impl BridgeEvent {
    /// Event name.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeEvent::KeyRegistered { .. } => "KeyRegistered",
            BridgeEvent::KeyRemoved { .. } => "KeyRemoved",
            BridgeEvent::OperatorRegistered { .. } => "OperatorRegistered",
            BridgeEvent::OperatorDeregistered { .. } => "OperatorDeregistered",
            BridgeEvent::OperatorSlashed { .. } => "OperatorSlashed",
            BridgeEvent::WithdrawalInitiated { .. } => "WithdrawalInitiated",
            BridgeEvent::WithdrawalCompleted { .. } => "WithdrawalCompleted",
            BridgeEvent::DepositVerified { .. } => "DepositVerified",
            BridgeEvent::MessageSent { .. } => "MessageSent",
            BridgeEvent::MessageConsumed { .. } => "MessageConsumed",
            BridgeEvent::MessageCancelled { .. } => "MessageCancelled",
            BridgeEvent::FeesWithdrawn { .. } => "FeesWithdrawn",
            BridgeEvent::ConfigChanged { .. } => "ConfigChanged",
            BridgeEvent::OwnershipTransferStarted { .. } => "OwnershipTransferStarted",
            BridgeEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            BridgeEvent::Paused { .. } => "Paused",
            BridgeEvent::Unpaused { .. } => "Unpaused",
        }
    }
}

/// Append-only event log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BridgeEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event`.
    pub fn push(&mut self, event: BridgeEvent) {
        info!(?event, "[sb-04] event {}", event.name());
        self.events.push(event);
    }

    /// Every event, oldest first.
    pub fn all(&self) -> &[BridgeEvent] {
        &self.events
    }

    /// Events appended at or after position `cursor`.
    ///
    /// Observers keep `len()` as their cursor between polls.
    pub fn since(&self, cursor: usize) -> &[BridgeEvent] {
        self.events.get(cursor..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&BridgeEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

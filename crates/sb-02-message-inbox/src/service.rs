//! # Message Inbox Service
//!
//! Application service implementing `MessageInboxApi`.
//!
//! Every operation validates completely before it mutates, so a rejected
//! call leaves the inbox untouched. Value never moves here: `cancel` and
//! `withdraw_fees` return the `Payout` the caller must execute.

use crate::domain::{
    compute_message_id, ConsumedMessage, InboxConfig, InboxError, L1ToL2Message, MessageId,
    MessageStatus, SendParams,
};
use crate::ports::inbound::MessageInboxApi;
use shared_types::{is_zero, short_hex, Address, Amount, BlockHeight, Payout};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// In-memory message inbox.
#[derive(Debug)]
pub struct MessageInbox {
    config: InboxConfig,
    messages: HashMap<MessageId, L1ToL2Message>,
    consumers: HashSet<Address>,
    counter: u64,
    /// Fees of pending messages, refundable on cancel.
    escrowed_fees: Amount,
    /// Fees of consumed messages, withdrawable by the administrator.
    fee_pool: Amount,
}

impl MessageInbox {
    /// Create an empty inbox.
    pub fn new(config: InboxConfig) -> Self {
        Self {
            config,
            messages: HashMap::new(),
            consumers: HashSet::new(),
            counter: 0,
            escrowed_fees: 0,
            fee_pool: 0,
        }
    }

    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    /// Id the next send with `params` would be stored under.
    fn next_id(&self, params: &SendParams) -> MessageId {
        compute_message_id(
            &params.sender,
            &params.recipient,
            &params.content,
            &params.secret_hash,
            params.deadline,
            self.counter,
            self.config.chain_id,
        )
    }

    /// Number of messages ever sent.
    pub fn message_count(&self) -> u64 {
        self.counter
    }

    pub fn escrowed_fees(&self) -> Amount {
        self.escrowed_fees
    }

    pub fn fee_pool(&self) -> Amount {
        self.fee_pool
    }

    pub fn is_authorized_consumer(&self, account: &Address) -> bool {
        self.consumers.contains(account)
    }

    /// Allow `consumer` to consume messages. Returns false if already allowed.
    pub fn authorize_consumer(&mut self, consumer: Address) -> Result<bool, InboxError> {
        if is_zero(&consumer) {
            return Err(InboxError::ZeroAddress);
        }
        let added = self.consumers.insert(consumer);
        if added {
            info!("[sb-02] consumer authorized: {}", short_hex(&consumer));
        }
        Ok(added)
    }

    /// Revoke `consumer`. Returns false if it was not authorized.
    pub fn revoke_consumer(&mut self, consumer: &Address) -> bool {
        let removed = self.consumers.remove(consumer);
        if removed {
            info!("[sb-02] consumer revoked: {}", short_hex(consumer));
        }
        removed
    }

    /// Update the minimum fee for future sends.
    pub fn set_min_fee(&mut self, min_fee: Amount) {
        self.config.min_fee = min_fee;
    }

    /// Check a fee withdrawal without applying it.
    pub fn validate_withdraw_fees(&self, to: &Address, amount: Amount) -> Result<(), InboxError> {
        if is_zero(to) {
            return Err(InboxError::ZeroAddress);
        }
        if amount > self.fee_pool {
            return Err(InboxError::InsufficientFeePool {
                available: self.fee_pool,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Take `amount` out of the consumed-fee pool.
    pub fn withdraw_fees(&mut self, to: Address, amount: Amount) -> Result<Payout, InboxError> {
        self.validate_withdraw_fees(&to, amount)?;
        self.fee_pool -= amount;
        info!(amount, "[sb-02] fees withdrawn to {}", short_hex(&to));
        Ok(Payout::new(to, amount))
    }

    fn pending(&self, id: &MessageId) -> Result<&L1ToL2Message, InboxError> {
        let msg = self
            .messages
            .get(id)
            .ok_or(InboxError::MessageNotFound(*id))?;
        match msg.status {
            MessageStatus::Pending => Ok(msg),
            MessageStatus::Consumed => Err(InboxError::AlreadyConsumed),
            MessageStatus::Cancelled => Err(InboxError::AlreadyCancelled),
        }
    }

    /// Check a cancellation without applying it.
    pub fn validate_cancel(
        &self,
        caller: &Address,
        id: &MessageId,
        height: BlockHeight,
    ) -> Result<&L1ToL2Message, InboxError> {
        let msg = self.pending(id)?;
        if msg.sender != *caller {
            return Err(InboxError::NotSender);
        }
        if !msg.is_expired(height) {
            return Err(InboxError::NotExpired {
                deadline: msg.deadline,
                height,
            });
        }
        Ok(msg)
    }

    fn transition(&mut self, id: &MessageId, next: MessageStatus) -> Option<Amount> {
        let msg = self.messages.get_mut(id)?;
        if !msg.status.can_transition_to(next) {
            return None;
        }
        msg.status = next;
        Some(msg.fee)
    }
}

impl MessageInboxApi for MessageInbox {
    fn validate_send(&self, params: &SendParams, height: BlockHeight) -> Result<(), InboxError> {
        if is_zero(&params.recipient) {
            return Err(InboxError::NullRecipient);
        }
        if params.fee < self.config.min_fee {
            return Err(InboxError::InsufficientFee {
                provided: params.fee,
                required: self.config.min_fee,
            });
        }
        let (min, max) = InboxConfig::deadline_window(height);
        if params.deadline < min || params.deadline > max {
            return Err(InboxError::DeadlineOutOfRange {
                deadline: params.deadline,
                min,
                max,
            });
        }
        if self.counter == u64::MAX || self.escrowed_fees.checked_add(params.fee).is_none() {
            return Err(InboxError::Overflow);
        }
        let id = self.next_id(params);
        if self.messages.contains_key(&id) {
            return Err(InboxError::MessageAlreadyExists(id));
        }
        Ok(())
    }

    fn send(&mut self, params: SendParams, height: BlockHeight) -> Result<MessageId, InboxError> {
        self.validate_send(&params, height)?;

        let id = self.next_id(&params);

        self.counter += 1;
        self.escrowed_fees += params.fee;
        self.messages.insert(
            id,
            L1ToL2Message {
                sender: params.sender,
                recipient: params.recipient,
                content: params.content,
                secret_hash: params.secret_hash,
                fee: params.fee,
                deadline: params.deadline,
                status: MessageStatus::Pending,
            },
        );

        info!(
            fee = params.fee,
            deadline = params.deadline,
            "[sb-02] message {} sent by {}",
            short_hex(&id),
            short_hex(&params.sender)
        );
        Ok(id)
    }

    fn cancel(
        &mut self,
        caller: &Address,
        id: &MessageId,
        height: BlockHeight,
    ) -> Result<Payout, InboxError> {
        let sender = self.validate_cancel(caller, id, height)?.sender;
        let fee = self
            .transition(id, MessageStatus::Cancelled)
            .ok_or(InboxError::MessageNotFound(*id))?;
        self.escrowed_fees -= fee;

        info!(fee, "[sb-02] message {} cancelled", short_hex(id));
        Ok(Payout::new(sender, fee))
    }

    fn consume(
        &mut self,
        caller: &Address,
        id: &MessageId,
    ) -> Result<ConsumedMessage, InboxError> {
        if !self.consumers.contains(caller) {
            return Err(InboxError::UnauthorizedConsumer(*caller));
        }
        let consumed = ConsumedMessage::from(self.pending(id)?);
        let fee = self
            .transition(id, MessageStatus::Consumed)
            .ok_or(InboxError::MessageNotFound(*id))?;
        self.escrowed_fees -= fee;
        self.fee_pool = self.fee_pool.saturating_add(fee);

        debug!("[sb-02] message {} consumed by {}", short_hex(id), short_hex(caller));
        Ok(consumed)
    }

    fn is_pending(&self, id: &MessageId) -> bool {
        self.pending(id).is_ok()
    }

    fn get(&self, id: &MessageId) -> Option<&L1ToL2Message> {
        self.messages.get(id)
    }
}

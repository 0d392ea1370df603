//! User messages, consumption and the fee pool.

use super::{observe_rejection, Bridge};
use crate::domain::{BridgeError, BridgeEvent, ConfigParameter};
use bridge_telemetry::{metric_inc, INBOX_MESSAGES};
use sb_01_signature_verification::SignatureScheme;
use sb_02_message_inbox::{ConsumedMessage, MessageId, MessageInboxApi, SendParams};
use shared_types::{Address, Amount, Asset, BlockHeight, Bytes32, CallContext, Hash, ValueLedger};

impl<S: SignatureScheme, L: ValueLedger> Bridge<S, L> {
    /// Queue a message from the caller; the attached value is the fee.
    pub fn send_message(
        &mut self,
        ctx: &CallContext,
        recipient: Bytes32,
        content: Hash,
        secret_hash: Hash,
        deadline: BlockHeight,
    ) -> Result<MessageId, BridgeError> {
        let params = SendParams {
            sender: ctx.caller,
            recipient,
            content,
            secret_hash,
            fee: ctx.value,
            deadline,
        };
        self.try_send_message(ctx, params)
            .inspect_err(|e| observe_rejection("send_message", e))
    }

    fn try_send_message(
        &mut self,
        ctx: &CallContext,
        params: SendParams,
    ) -> Result<MessageId, BridgeError> {
        self.require_not_paused()?;
        self.state.inbox.validate_send(&params, ctx.height)?;
        self.require_funds(Asset::Native, &ctx.caller, params.fee)?;

        self.collect(Asset::Native, &ctx.caller, params.fee)?;
        let (fee, deadline) = (params.fee, params.deadline);
        let recipient = params.recipient;
        let message_id = self.state.inbox.send(params, ctx.height)?;

        self.emit(BridgeEvent::MessageSent {
            message_id,
            sender: ctx.caller,
            recipient,
            fee,
            deadline,
        });
        metric_inc!(INBOX_MESSAGES, &["sent"]);
        Ok(message_id)
    }

    /// Cancel the caller's expired message and refund its fee.
    pub fn cancel_message(
        &mut self,
        ctx: &CallContext,
        message_id: &MessageId,
    ) -> Result<Amount, BridgeError> {
        let refund = self
            .state
            .inbox
            .cancel(&ctx.caller, message_id, ctx.height)
            .map_err(BridgeError::from)
            .inspect_err(|e| observe_rejection("cancel_message", e))?;

        self.emit(BridgeEvent::MessageCancelled {
            message_id: *message_id,
            refund: refund.amount,
        });
        metric_inc!(INBOX_MESSAGES, &["cancelled"]);
        self.pay(Asset::Native, refund)?;
        Ok(refund.amount)
    }

    /// Deliver a pending message to an authorized consumer.
    pub fn consume_message(
        &mut self,
        ctx: &CallContext,
        message_id: &MessageId,
    ) -> Result<ConsumedMessage, BridgeError> {
        let consumed = self
            .state
            .inbox
            .consume(&ctx.caller, message_id)
            .map_err(BridgeError::from)
            .inspect_err(|e| observe_rejection("consume_message", e))?;

        self.emit(BridgeEvent::MessageConsumed {
            message_id: *message_id,
            consumer: ctx.caller,
        });
        metric_inc!(INBOX_MESSAGES, &["consumed"]);
        Ok(consumed)
    }

    /// Whether `message_id` exists and is still pending.
    pub fn is_message_pending(&self, message_id: &MessageId) -> bool {
        self.state.inbox.is_pending(message_id)
    }

    // =========================================================================
    // Owner-only
    // =========================================================================

    /// Allow `consumer` to consume messages.
    pub fn authorize_consumer(
        &mut self,
        ctx: &CallContext,
        consumer: Address,
    ) -> Result<(), BridgeError> {
        let added = self
            .require_owner(ctx)
            .and_then(|_| {
                self.state
                    .inbox
                    .authorize_consumer(consumer)
                    .map_err(BridgeError::from)
            })
            .inspect_err(|e| observe_rejection("authorize_consumer", e))?;

        if added {
            self.emit(BridgeEvent::ConfigChanged {
                parameter: ConfigParameter::ConsumerAuthorized(consumer),
            });
        }
        Ok(())
    }

    /// Withdraw consumer rights from `consumer`.
    pub fn revoke_consumer(
        &mut self,
        ctx: &CallContext,
        consumer: &Address,
    ) -> Result<(), BridgeError> {
        self.require_owner(ctx)
            .inspect_err(|e| observe_rejection("revoke_consumer", e))?;

        if self.state.inbox.revoke_consumer(consumer) {
            self.emit(BridgeEvent::ConfigChanged {
                parameter: ConfigParameter::ConsumerRevoked(*consumer),
            });
        }
        Ok(())
    }

    /// Pay `amount` of consumed-message fees to `to`.
    pub fn withdraw_fees(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: Amount,
    ) -> Result<(), BridgeError> {
        let payout = self
            .require_owner(ctx)
            .and_then(|_| {
                self.state
                    .inbox
                    .withdraw_fees(to, amount)
                    .map_err(BridgeError::from)
            })
            .inspect_err(|e| observe_rejection("withdraw_fees", e))?;

        self.emit(BridgeEvent::FeesWithdrawn { to, amount });
        self.pay(Asset::Native, payout)
    }
}

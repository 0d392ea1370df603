//! Quorum-gated deposit dispatch.

use super::{observe_rejection, Bridge};
use crate::domain::{BridgeError, BridgeEvent, DepositPayload};
use bridge_telemetry::{time_histogram, DISPATCHES, DISPATCH_DURATION, SIGNATURE_VERIFICATIONS};
use sb_01_signature_verification::{SchemeKind, SignatureScheme};
use sb_02_message_inbox::{MessageId, MessageInboxApi, SendParams};
use sb_03_operator_registry::OperatorRegistryApi;
use shared_types::{is_zero, short_hex, Address, Asset, CallContext, Hash, Payout, ValueLedger};
use tracing::{debug, info};

impl<S: SignatureScheme, L: ValueLedger> Bridge<S, L> {
    /// Verify a quorum attestation of `payload` and relay it to the inbox.
    ///
    /// `signatures` is the scheme's blob for `signers`, in signer order. The
    /// caller attaches at least the message fee; any excess is refunded.
    ///
    /// # Errors
    /// Every rejection leaves nonces, inbox and balances untouched.
    pub fn verify_and_dispatch(
        &mut self,
        ctx: &CallContext,
        payload: &DepositPayload,
        signatures: &[u8],
        signers: &[Address],
    ) -> Result<MessageId, BridgeError> {
        let _timer = time_histogram!(DISPATCH_DURATION);

        let result = self.dispatch(ctx, payload, signatures, signers);
        match &result {
            Ok(_) => DISPATCHES.with_label_values(&["accepted"]).inc(),
            Err(e) => {
                DISPATCHES.with_label_values(&[e.kind().as_str()]).inc();
                observe_rejection("verify_and_dispatch", e);
            }
        }
        result
    }

    /// Run every dispatch check; returns the message to send.
    pub fn validate_dispatch(
        &self,
        ctx: &CallContext,
        payload: &DepositPayload,
        signatures: &[u8],
        signers: &[Address],
    ) -> Result<SendParams, BridgeError> {
        self.validate_payload(ctx, payload)?;

        if self.is_nonce_used(payload.nonce) {
            return Err(BridgeError::NonceAlreadyUsed(payload.nonce));
        }

        self.validate_signer_set(signers)?;

        let digest = self.digest(payload);
        self.check_signatures(&digest, signatures, signers)?;

        let params = SendParams {
            sender: *self.address(),
            recipient: self.state.destination_bridge,
            content: payload.content_hash(),
            secret_hash: payload.secret_hash,
            fee: self.state.message_fee,
            deadline: ctx
                .height
                .saturating_add(self.state.dispatch_deadline_blocks),
        };
        self.state.inbox.validate_send(&params, ctx.height)?;
        self.require_funds(Asset::Native, &ctx.caller, ctx.value)?;
        Ok(params)
    }

    fn dispatch(
        &mut self,
        ctx: &CallContext,
        payload: &DepositPayload,
        signatures: &[u8],
        signers: &[Address],
    ) -> Result<MessageId, BridgeError> {
        let params = self.validate_dispatch(ctx, payload, signatures, signers)?;
        let fee = params.fee;
        let deadline = params.deadline;

        self.collect(Asset::Native, &ctx.caller, ctx.value)?;
        self.state.nonces.insert(payload.nonce);
        let message_id = self.state.inbox.send(params, ctx.height)?;

        let sender = *self.address();
        let recipient = self.state.destination_bridge;
        self.emit(BridgeEvent::MessageSent {
            message_id,
            sender,
            recipient,
            fee,
            deadline,
        });
        self.emit(BridgeEvent::DepositVerified {
            source_tx_id: payload.source_tx_id,
            amount: payload.amount,
            secret_hash: payload.secret_hash,
            destination_address: payload.destination_address,
            message_id,
        });

        let excess = ctx.value - fee;
        if excess > 0 {
            self.pay(Asset::Native, Payout::new(ctx.caller, excess))?;
        }

        info!(
            nonce = payload.nonce,
            amount = payload.amount,
            signers = signers.len(),
            "[sb-04] deposit {} dispatched as message {}",
            short_hex(&payload.source_tx_id),
            short_hex(&message_id)
        );
        Ok(message_id)
    }

    /// Field, fee, pause and destination checks.
    fn validate_payload(
        &self,
        ctx: &CallContext,
        payload: &DepositPayload,
    ) -> Result<(), BridgeError> {
        if payload.amount == 0 {
            return Err(BridgeError::ZeroAmount);
        }
        if is_zero(&payload.secret_hash) {
            return Err(BridgeError::NullSecretHash);
        }
        if is_zero(&payload.destination_address) {
            return Err(BridgeError::NullDestinationAddress);
        }
        if ctx.value < self.state.message_fee {
            return Err(BridgeError::InsufficientValue {
                provided: ctx.value,
                required: self.state.message_fee,
            });
        }
        self.require_not_paused()?;
        if is_zero(&self.state.destination_bridge) {
            return Err(BridgeError::DestinationBridgeNotSet);
        }
        Ok(())
    }

    /// Quorum size, activity and uniqueness of the named signers.
    fn validate_signer_set(&self, signers: &[Address]) -> Result<(), BridgeError> {
        let registry = &self.state.registry;

        let required = registry.required_signers();
        if signers.len() < required {
            return Err(BridgeError::InsufficientSigners {
                provided: signers.len(),
                required,
            });
        }
        // A longer list must repeat or include an inactive signer
        let active = registry.active_count();
        if signers.len() > active {
            return Err(BridgeError::TooManySigners {
                provided: signers.len(),
                active,
            });
        }

        // Bounded by the active set, so the pairwise scan stays small
        for (i, signer) in signers.iter().enumerate() {
            if !registry.is_active(signer) {
                return Err(BridgeError::InactiveSigner(*signer));
            }
            if signers[..i].contains(signer) {
                return Err(BridgeError::DuplicateSigner(*signer));
            }
        }

        debug!(
            signers = signers.len(),
            required, "[sb-04] signer set accepted"
        );
        Ok(())
    }

    fn check_signatures(
        &self,
        digest: &Hash,
        signatures: &[u8],
        signers: &[Address],
    ) -> Result<(), BridgeError> {
        let scheme = match self.scheme.kind() {
            SchemeKind::Recoverable => "recoverable",
            SchemeKind::Aggregate => "aggregate",
        };
        let valid = self.scheme.verify(digest, signatures, signers);
        SIGNATURE_VERIFICATIONS
            .with_label_values(&[scheme, if valid { "valid" } else { "invalid" }])
            .inc();

        if !valid {
            return Err(BridgeError::SignatureVerificationFailed);
        }
        Ok(())
    }
}

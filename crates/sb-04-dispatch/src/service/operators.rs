//! Operator keys, staking and slashing.

use super::{observe_rejection, Bridge};
use crate::adapters::SchemeKeys;
use crate::domain::{BridgeError, BridgeEvent};
use bridge_telemetry::{metric_inc, SLASHINGS};
use sb_01_signature_verification::SignatureScheme;
use sb_03_operator_registry::{PendingWithdrawal, SlashOutcome};
use shared_types::{short_hex, Address, Amount, Asset, CallContext, ValueLedger};
use tracing::info;

impl<S: SignatureScheme, L: ValueLedger> Bridge<S, L> {
    // =========================================================================
    // Keys
    // =========================================================================

    /// Put the caller's verification key on file.
    pub fn register_key(
        &mut self,
        ctx: &CallContext,
        key_material: &[u8],
    ) -> Result<(), BridgeError> {
        self.scheme
            .register_key(ctx.caller, key_material)
            .map_err(BridgeError::from)
            .inspect_err(|e| observe_rejection("register_key", e))?;

        self.emit(BridgeEvent::KeyRegistered { owner: ctx.caller });
        Ok(())
    }

    /// Remove `owner`'s key. Owner only.
    pub fn remove_key(&mut self, ctx: &CallContext, owner: &Address) -> Result<(), BridgeError> {
        self.require_owner(ctx)
            .and_then(|_| self.scheme.remove_key(owner).map_err(BridgeError::from))
            .inspect_err(|e| observe_rejection("remove_key", e))?;

        self.emit(BridgeEvent::KeyRemoved { owner: *owner });
        Ok(())
    }

    // =========================================================================
    // Staking
    // =========================================================================

    /// Bond `stake` and become an active operator.
    ///
    /// Native stake travels as the call's attached value, which must equal
    /// `stake`. Token stake is pulled from the caller's token balance and the
    /// call must carry no value.
    pub fn register_operator(
        &mut self,
        ctx: &CallContext,
        stake: Amount,
    ) -> Result<(), BridgeError> {
        self.try_register_operator(ctx, stake)
            .inspect_err(|e| observe_rejection("register_operator", e))
    }

    fn try_register_operator(
        &mut self,
        ctx: &CallContext,
        stake: Amount,
    ) -> Result<(), BridgeError> {
        self.require_not_paused()?;

        let asset = self.stake_asset();
        let expected_value = match asset {
            Asset::Native => stake,
            Asset::Token(_) => 0,
        };
        if ctx.value != expected_value {
            return Err(BridgeError::StakeValueMismatch {
                expected: expected_value,
                attached: ctx.value,
            });
        }

        self.state
            .registry
            .validate_register(&ctx.caller, stake, &SchemeKeys(&self.scheme))?;
        self.require_funds(asset, &ctx.caller, stake)?;

        self.collect(asset, &ctx.caller, stake)?;
        self.state
            .registry
            .register(ctx.caller, stake, ctx.height, &SchemeKeys(&self.scheme))?;

        self.emit(BridgeEvent::OperatorRegistered {
            operator: ctx.caller,
            stake,
            height: ctx.height,
        });
        self.refresh_gauges();
        Ok(())
    }

    /// Start unbonding the caller's stake.
    pub fn deregister_operator(
        &mut self,
        ctx: &CallContext,
    ) -> Result<PendingWithdrawal, BridgeError> {
        let withdrawal = self
            .state
            .registry
            .deregister(&ctx.caller, ctx.height)
            .map_err(BridgeError::from)
            .inspect_err(|e| observe_rejection("deregister_operator", e))?;

        self.emit(BridgeEvent::OperatorDeregistered {
            operator: ctx.caller,
            height: ctx.height,
        });
        self.emit(BridgeEvent::WithdrawalInitiated {
            operator: ctx.caller,
            amount: withdrawal.amount,
            unlock_height: withdrawal.unlock_height,
        });
        self.refresh_gauges();
        Ok(withdrawal)
    }

    /// Release the caller's unlocked withdrawal.
    pub fn complete_withdrawal(&mut self, ctx: &CallContext) -> Result<Amount, BridgeError> {
        let payout = self
            .state
            .registry
            .complete_withdrawal(&ctx.caller, ctx.height)
            .map_err(BridgeError::from)
            .inspect_err(|e| observe_rejection("complete_withdrawal", e))?;

        self.emit(BridgeEvent::WithdrawalCompleted {
            operator: ctx.caller,
            amount: payout.amount,
        });
        let asset = self.stake_asset();
        self.pay(asset, payout)?;
        Ok(payout.amount)
    }

    // =========================================================================
    // Slashing
    // =========================================================================

    /// Penalise `operator` on the strength of `proof`. Owner only.
    ///
    /// The penalty is paid to the treasury.
    pub fn slash_operator(
        &mut self,
        ctx: &CallContext,
        operator: &Address,
        proof: &[u8],
    ) -> Result<SlashOutcome, BridgeError> {
        self.try_slash_operator(ctx, operator, proof)
            .inspect_err(|e| observe_rejection("slash_operator", e))
    }

    fn try_slash_operator(
        &mut self,
        ctx: &CallContext,
        operator: &Address,
        proof: &[u8],
    ) -> Result<SlashOutcome, BridgeError> {
        self.require_owner(ctx)?;
        let outcome = self.state.registry.slash(
            operator,
            proof,
            ctx.height,
            self.fraud_proofs.as_ref(),
        )?;

        self.emit(BridgeEvent::OperatorSlashed {
            operator: *operator,
            penalty: outcome.penalty.amount,
            remaining: outcome.remaining,
            deactivated: outcome.deactivated,
        });
        if let Some(withdrawal) = outcome.forced_withdrawal {
            self.emit(BridgeEvent::WithdrawalInitiated {
                operator: *operator,
                amount: withdrawal.amount,
                unlock_height: withdrawal.unlock_height,
            });
        }
        metric_inc!(SLASHINGS);
        self.refresh_gauges();

        let asset = self.stake_asset();
        self.pay(asset, outcome.penalty)?;

        info!(
            penalty = outcome.penalty.amount,
            "[sb-04] slash of {} paid to treasury {}",
            short_hex(operator),
            short_hex(&outcome.penalty.to)
        );
        Ok(outcome)
    }
}

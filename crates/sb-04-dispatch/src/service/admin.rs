//! Parameters, pause switch and ownership.
//!
//! Every setter is owner-only, validates before it writes, and records a
//! `ConfigChanged` event.

use super::{observe_rejection, Bridge};
use crate::domain::{BridgeError, BridgeEvent, ConfigParameter};
use sb_01_signature_verification::SignatureScheme;
use shared_types::{is_zero, Address, Amount, Bytes32, CallContext, ValueLedger};
use tracing::info;

impl<S: SignatureScheme, L: ValueLedger> Bridge<S, L> {
    /// Apply an owner-only change and record it.
    fn configure<F>(
        &mut self,
        ctx: &CallContext,
        operation: &'static str,
        apply: F,
    ) -> Result<(), BridgeError>
    where
        F: FnOnce(&mut Self) -> Result<ConfigParameter, BridgeError>,
    {
        let parameter = self
            .require_owner(ctx)
            .and_then(|_| apply(self))
            .inspect_err(|e| observe_rejection(operation, e))?;

        info!(?parameter, "[sb-04] configuration changed");
        self.emit(BridgeEvent::ConfigChanged { parameter });
        Ok(())
    }

    pub fn set_minimum_stake(
        &mut self,
        ctx: &CallContext,
        minimum_stake: Amount,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_minimum_stake", |bridge| {
            bridge.state.registry.set_minimum_stake(minimum_stake)?;
            Ok(ConfigParameter::MinimumStake(minimum_stake))
        })
    }

    pub fn set_quorum_bps(
        &mut self,
        ctx: &CallContext,
        quorum_bps: u32,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_quorum_bps", |bridge| {
            bridge.state.registry.set_quorum_bps(quorum_bps)?;
            Ok(ConfigParameter::QuorumBps(quorum_bps))
        })
    }

    /// Capped at 50%.
    pub fn set_slash_bps(
        &mut self,
        ctx: &CallContext,
        slash_bps: u32,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_slash_bps", |bridge| {
            bridge.state.registry.set_slash_bps(slash_bps)?;
            Ok(ConfigParameter::SlashBps(slash_bps))
        })
    }

    /// Lowering the cap below the active count only blocks new registrations.
    pub fn set_operator_cap(
        &mut self,
        ctx: &CallContext,
        operator_cap: usize,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_operator_cap", |bridge| {
            bridge.state.registry.set_operator_cap(operator_cap)?;
            Ok(ConfigParameter::OperatorCap(operator_cap))
        })
    }

    pub fn set_treasury(
        &mut self,
        ctx: &CallContext,
        treasury: Address,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_treasury", |bridge| {
            bridge.state.registry.set_treasury(treasury)?;
            Ok(ConfigParameter::Treasury(treasury))
        })
    }

    /// Dispatch fee; also the minimum fee for user messages.
    pub fn set_message_fee(
        &mut self,
        ctx: &CallContext,
        message_fee: Amount,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_message_fee", |bridge| {
            bridge.state.message_fee = message_fee;
            bridge.state.inbox.set_min_fee(message_fee);
            Ok(ConfigParameter::MessageFee(message_fee))
        })
    }

    pub fn set_destination_bridge(
        &mut self,
        ctx: &CallContext,
        destination_bridge: Bytes32,
    ) -> Result<(), BridgeError> {
        self.configure(ctx, "set_destination_bridge", |bridge| {
            if is_zero(&destination_bridge) {
                return Err(BridgeError::ZeroAddress);
            }
            bridge.state.destination_bridge = destination_bridge;
            Ok(ConfigParameter::DestinationBridge(destination_bridge))
        })
    }

    // =========================================================================
    // Pause
    // =========================================================================

    /// Stop registrations, sends and dispatches. Exits stay open.
    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), BridgeError> {
        self.require_owner(ctx)
            .and_then(|_| self.require_not_paused())
            .inspect_err(|e| observe_rejection("pause", e))?;

        self.state.paused = true;
        self.emit(BridgeEvent::Paused { by: ctx.caller });
        Ok(())
    }

    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), BridgeError> {
        self.require_owner(ctx)
            .and_then(|_| {
                if self.state.paused {
                    Ok(())
                } else {
                    Err(BridgeError::NotPaused)
                }
            })
            .inspect_err(|e| observe_rejection("unpause", e))?;

        self.state.paused = false;
        self.emit(BridgeEvent::Unpaused { by: ctx.caller });
        Ok(())
    }

    // =========================================================================
    // Ownership
    // =========================================================================

    /// Nominate `new_owner`. Authority moves when they accept.
    pub fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), BridgeError> {
        self.state
            .ownership
            .start_transfer(&ctx.caller, new_owner)
            .inspect_err(|e| observe_rejection("transfer_ownership", e))?;

        self.emit(BridgeEvent::OwnershipTransferStarted {
            owner: ctx.caller,
            pending_owner: new_owner,
        });
        Ok(())
    }

    /// Accept a pending nomination.
    pub fn accept_ownership(&mut self, ctx: &CallContext) -> Result<(), BridgeError> {
        let previous_owner = self
            .state
            .ownership
            .accept(&ctx.caller)
            .inspect_err(|e| observe_rejection("accept_ownership", e))?;

        self.emit(BridgeEvent::OwnershipTransferred {
            previous_owner,
            new_owner: ctx.caller,
        });
        Ok(())
    }
}

//! Dispatch Orchestrator Service
//!
//! # Architecture
//! - `Bridge` owns the whole trust-layer state (`BridgeState`), the chosen
//!   signature scheme and the value ledger
//! - Every operation validates completely before it mutates
//! - Component operations hand back the transfers they imply; the bridge
//!   executes them last, after bookkeeping and events
//!
//! Operations are grouped by concern: `dispatch` (quorum-gated deposit
//! relay), `operators` (keys, staking, slashing), `inbox` (user messages,
//! consumption, fees) and `admin` (parameters, pause, ownership).

mod admin;
mod dispatch;
mod inbox;
mod operators;

use crate::domain::{
    BridgeConfig, BridgeError, BridgeEvent, DepositPayload, Eip712Domain, EventLog, NonceSet,
    Ownership,
};
use bridge_telemetry::{ACTIVE_OPERATORS, BRIDGE_ERRORS, TOTAL_STAKED};
use sb_01_signature_verification::SignatureScheme;
use sb_02_message_inbox::MessageInbox;
use sb_03_operator_registry::{
    FraudProofVerifier, OperatorIdentityProof, OperatorRegistry, OperatorRegistryApi,
};
use shared_types::{
    Address, Amount, Asset, BlockHeight, Bytes32, CallContext, Hash, LedgerError, Payout,
    ValueLedger,
};
use tracing::{debug, warn};

/// Everything the bridge remembers between calls.
///
/// Built fresh per deployment (or per test); nothing lives in process-wide
/// statics.
#[derive(Debug)]
pub struct BridgeState {
    registry: OperatorRegistry,
    inbox: MessageInbox,
    nonces: NonceSet,
    ownership: Ownership,
    events: EventLog,
    paused: bool,
    message_fee: Amount,
    destination_bridge: Bytes32,
    dispatch_deadline_blocks: BlockHeight,
    domain: Eip712Domain,
}

impl BridgeState {
    /// Fresh state for `config`, administered by `owner`.
    pub fn new(config: &BridgeConfig, owner: Address) -> Result<Self, BridgeError> {
        config.validate()?;
        Ok(Self {
            registry: OperatorRegistry::new(config.registry_config(owner))?,
            inbox: MessageInbox::new(config.inbox_config()),
            nonces: NonceSet::new(),
            ownership: Ownership::new(owner)?,
            events: EventLog::new(),
            paused: false,
            message_fee: config.message_fee,
            destination_bridge: config.destination_bridge,
            dispatch_deadline_blocks: config.dispatch_deadline_blocks,
            domain: config.domain(),
        })
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn inbox(&self) -> &MessageInbox {
        &self.inbox
    }

    pub fn nonces(&self) -> &NonceSet {
        &self.nonces
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

/// The bridge trust layer: operator registry, quorum verification and the
/// outbound message inbox behind one state machine.
pub struct Bridge<S: SignatureScheme, L: ValueLedger> {
    state: BridgeState,
    scheme: S,
    ledger: L,
    fraud_proofs: Box<dyn FraudProofVerifier>,
}

impl<S: SignatureScheme, L: ValueLedger> Bridge<S, L> {
    /// Deploy a bridge with fresh state.
    pub fn new(
        config: BridgeConfig,
        owner: Address,
        scheme: S,
        ledger: L,
    ) -> Result<Self, BridgeError> {
        let state = BridgeState::new(&config, owner)?;
        Ok(Self::with_state(state, scheme, ledger))
    }

    /// Run over an existing state store.
    pub fn with_state(state: BridgeState, scheme: S, ledger: L) -> Self {
        let bridge = Self {
            state,
            scheme,
            ledger,
            fraud_proofs: Box::new(OperatorIdentityProof),
        };
        bridge.refresh_gauges();
        bridge
    }

    /// Replace the fraud-proof verifier used by `slash_operator`.
    pub fn with_fraud_proof_verifier(mut self, verifier: Box<dyn FraudProofVerifier>) -> Self {
        self.fraud_proofs = verifier;
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Custody identity and verifying contract of this deployment.
    pub fn address(&self) -> &Address {
        &self.state.domain.verifying_contract
    }

    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.state.registry
    }

    pub fn inbox(&self) -> &MessageInbox {
        &self.state.inbox
    }

    pub fn events(&self) -> &[BridgeEvent] {
        self.state.events.all()
    }

    pub fn owner(&self) -> &Address {
        self.state.ownership.owner()
    }

    pub fn pending_owner(&self) -> Option<&Address> {
        self.state.ownership.pending_owner()
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn message_fee(&self) -> Amount {
        self.state.message_fee
    }

    pub fn destination_bridge(&self) -> &Bytes32 {
        &self.state.destination_bridge
    }

    pub fn dispatch_deadline_blocks(&self) -> BlockHeight {
        self.state.dispatch_deadline_blocks
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.state.domain
    }

    pub fn domain_separator(&self) -> Hash {
        self.state.domain.separator()
    }

    /// Digest operators must sign to attest `payload`.
    pub fn digest(&self, payload: &DepositPayload) -> Hash {
        self.state.domain.digest(payload)
    }

    /// Whether `nonce` was already dispatched.
    pub fn is_nonce_used(&self, nonce: u64) -> bool {
        self.state.nonces.contains(nonce)
    }

    /// Signatures a dispatch needs right now.
    pub fn required_signers(&self) -> usize {
        self.state.registry.required_signers()
    }

    pub fn stake_asset(&self) -> Asset {
        self.state.registry.config().stake_asset
    }

    // =========================================================================
    // Guards and effects
    // =========================================================================

    fn require_owner(&self, ctx: &CallContext) -> Result<(), BridgeError> {
        self.state.ownership.require_owner(&ctx.caller)
    }

    fn require_not_paused(&self) -> Result<(), BridgeError> {
        if self.state.paused {
            return Err(BridgeError::Paused);
        }
        Ok(())
    }

    /// Reject unless `from` can cover `amount` of `asset`.
    fn require_funds(
        &self,
        asset: Asset,
        from: &Address,
        amount: Amount,
    ) -> Result<(), BridgeError> {
        let available = self.ledger.balance_of(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset,
                account: *from,
                available,
                required: amount,
            }
            .into());
        }
        Ok(())
    }

    /// Take `amount` of `asset` from `from` into custody.
    fn collect(
        &mut self,
        asset: Asset,
        from: &Address,
        amount: Amount,
    ) -> Result<(), BridgeError> {
        let custody = *self.address();
        self.ledger.transfer(asset, from, &custody, amount)?;
        Ok(())
    }

    /// Pay out of custody. Only called once bookkeeping is final.
    fn pay(&mut self, asset: Asset, payout: Payout) -> Result<(), BridgeError> {
        let custody = *self.address();
        self.ledger
            .transfer(asset, &custody, &payout.to, payout.amount)?;
        debug!(%asset, amount = payout.amount, "[sb-04] payout executed");
        Ok(())
    }

    fn emit(&mut self, event: BridgeEvent) {
        self.state.events.push(event);
    }

    fn refresh_gauges(&self) {
        ACTIVE_OPERATORS.set(self.state.registry.active_count() as f64);
        TOTAL_STAKED.set(self.state.registry.total_staked() as f64);
    }
}

/// Log and count a rejected operation.
fn observe_rejection(operation: &'static str, error: &BridgeError) {
    let kind = error.kind();
    BRIDGE_ERRORS
        .with_label_values(&[operation, kind.as_str()])
        .inc();
    warn!(operation, ?kind, "[sb-04] rejected: {}", error);
}

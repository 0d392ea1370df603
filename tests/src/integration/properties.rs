//! # Property Tests
//!
//! Invariants that must survive arbitrary call sequences:
//!
//! - Custody always equals active stake plus pending withdrawals plus fees
//! - A used nonce stays used whatever else the payload says
//! - Registering twice never yields a second operator record
//! - Required signers grow monotonically with the active set
//! - Send/consume and send/cancel round-trips settle the fee exactly

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use proptest::prelude::*;
    use sb_02_message_inbox::{MessageInboxApi, MessageStatus, MAX_DEADLINE_OFFSET};
    use sb_03_operator_registry::{
        required_signers, OperatorIdentityProof, OperatorRegistryApi, RegistryError,
        MAX_QUORUM_BPS, UNBONDING_PERIOD,
    };
    use sb_04_dispatch::test_helpers::sample_payload;
    use sb_04_dispatch::{BridgeConfig, BridgeError, DepositPayload};
    use shared_types::Amount;

    const IDENTITIES: usize = 4;

    #[derive(Clone, Copy, Debug)]
    enum Action {
        Register { who: usize, extra: Amount },
        Deregister { who: usize },
        Slash { who: usize },
        CompleteWithdrawal { who: usize },
        Advance,
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        let who = 0..IDENTITIES;
        prop_oneof![
            (who.clone(), 0u128..ETHER).prop_map(|(who, extra)| Action::Register { who, extra }),
            who.clone().prop_map(|who| Action::Deregister { who }),
            who.clone().prop_map(|who| Action::Slash { who }),
            who.prop_map(|who| Action::CompleteWithdrawal { who }),
            Just(Action::Advance),
        ]
    }

    /// Harness whose identities are keyed and funded but not yet bonded.
    fn unbonded_harness() -> Harness {
        let mut h = Harness::default();
        for _ in 0..IDENTITIES {
            let identity = h.keyed_identity();
            h.operators.push(identity);
        }
        h
    }

    fn apply(h: &mut Harness, action: Action) -> Result<(), BridgeError> {
        match action {
            Action::Register { who, extra } => {
                let stake = ETHER + extra;
                let ctx = h.ctx(h.address(who)).with_value(stake);
                h.bridge.register_operator(&ctx, stake)
            }
            Action::Deregister { who } => h
                .bridge
                .deregister_operator(&h.ctx(h.address(who)))
                .map(|_| ()),
            Action::Slash { who } => {
                let target = h.address(who);
                let proof = OperatorIdentityProof::encode(&target);
                h.bridge
                    .slash_operator(&h.ctx(OWNER), &target, &proof)
                    .map(|_| ())
            }
            Action::CompleteWithdrawal { who } => h
                .bridge
                .complete_withdrawal(&h.ctx(h.address(who)))
                .map(|_| ()),
            Action::Advance => {
                h.advance(UNBONDING_PERIOD / 2);
                Ok(())
            }
        }
    }

    fn pending_total(h: &Harness) -> Amount {
        h.operators
            .iter()
            .filter_map(|op| h.bridge.registry().pending_withdrawal(&op.address))
            .map(|w| w.amount)
            .sum()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn custody_backs_every_stake(actions in prop::collection::vec(arb_action(), 1..24)) {
            let mut h = unbonded_harness();

            for action in actions {
                let custody_before = h.custody();
                let events_before = h.bridge.events().len();

                if apply(&mut h, action).is_err() {
                    prop_assert_eq!(h.custody(), custody_before);
                    prop_assert_eq!(h.bridge.events().len(), events_before);
                }

                let registry = h.bridge.registry();
                prop_assert!(registry.check_invariants().is_ok());
                let active_sum: Amount = registry
                    .active_operators()
                    .iter()
                    .filter_map(|a| registry.operator(a))
                    .map(|op| op.stake)
                    .sum();
                prop_assert_eq!(active_sum, registry.total_staked());
                prop_assert_eq!(h.custody(), registry.total_staked() + pending_total(&h));
                prop_assert!(registry
                    .active_operators()
                    .iter()
                    .all(|a| registry.pending_withdrawal(a).is_none()));
            }
        }

        #[test]
        fn used_nonce_stays_used(
            nonce in any::<u64>(),
            amount in 1u128..u128::MAX,
            source_tx_id in any::<[u8; 32]>(),
        ) {
            let mut h = Harness::with_operators(bridge_config(), 1);
            h.dispatch(&sample_payload(nonce), &[0]).unwrap();

            let replay = DepositPayload {
                amount,
                source_tx_id,
                ..sample_payload(nonce)
            };
            prop_assert_eq!(
                h.dispatch(&replay, &[0]),
                Err(BridgeError::NonceAlreadyUsed(nonce))
            );
            h.advance(UNBONDING_PERIOD);
            prop_assert!(h.bridge.is_nonce_used(nonce));
            prop_assert_eq!(h.bridge.inbox().message_count(), 1);
        }

        #[test]
        fn second_registration_is_rejected(stake in ETHER..2 * ETHER, retry in ETHER..2 * ETHER) {
            let mut h = Harness::default();
            let index = h.add_operator_with_stake(stake).unwrap();
            let operator = h.address(index);

            let again = h.ctx(operator).with_value(retry);
            prop_assert_eq!(
                h.bridge.register_operator(&again, retry),
                Err(BridgeError::Registry(RegistryError::AlreadyActive(operator)))
            );
            prop_assert_eq!(h.bridge.registry().operators().len(), 1);
            prop_assert_eq!(h.bridge.registry().operator(&operator).unwrap().stake, stake);
            prop_assert_eq!(h.custody(), stake);
        }

        #[test]
        fn required_signers_monotonic(active in 0usize..500, bps in 1u32..=MAX_QUORUM_BPS) {
            let here = required_signers(active, bps);
            let next = required_signers(active + 1, bps);

            prop_assert!(here <= next);
            prop_assert!(next >= 1);
            prop_assert!(next <= active + 1);
        }

        #[test]
        fn send_round_trips_settle_fee(
            extra_fee in 0u128..ETHER,
            offset in 100u64..=MAX_DEADLINE_OFFSET,
            consume in any::<bool>(),
        ) {
            let mut h = Harness::default();
            let fee = h.bridge.message_fee() + extra_fee;
            let deadline = h.height + offset;
            let start = h.balance(&RELAYER);

            let id = h
                .bridge
                .send_message(&h.ctx(RELAYER).with_value(fee), [1; 32], [2; 32], [3; 32], deadline)
                .unwrap();
            prop_assert!(h.bridge.is_message_pending(&id));
            prop_assert_eq!(h.balance(&RELAYER), start - fee);

            if consume {
                h.bridge.authorize_consumer(&h.ctx(OWNER), CONSUMER).unwrap();
                h.bridge.consume_message(&h.ctx(CONSUMER), &id).unwrap();
                prop_assert_eq!(h.bridge.inbox().get(&id).unwrap().status, MessageStatus::Consumed);
                prop_assert_eq!(h.bridge.inbox().fee_pool(), fee);
            } else {
                h.height = deadline + 1;
                prop_assert_eq!(h.bridge.cancel_message(&h.ctx(RELAYER), &id), Ok(fee));
                prop_assert_eq!(h.bridge.inbox().get(&id).unwrap().status, MessageStatus::Cancelled);
                prop_assert_eq!(h.balance(&RELAYER), start);
            }
            prop_assert!(!h.bridge.is_message_pending(&id));
            prop_assert_eq!(h.bridge.inbox().escrowed_fees(), 0);
        }
    }

    #[test]
    fn test_unanimous_quorum_needs_everyone() {
        let h = Harness::with_operators(
            BridgeConfig {
                quorum_bps: MAX_QUORUM_BPS,
                ..bridge_config()
            },
            3,
        );
        assert_eq!(h.bridge.required_signers(), 3);
    }
}

//! # Reference Scenarios
//!
//! | Scenario | Subject |
//! |----------|---------|
//! | A | Quorum of one out of two operators dispatches |
//! | B | Repeated slashing and deactivation below the minimum |
//! | C | Unbonding period gates withdrawal |
//! | D | Identical sends in one block get distinct identifiers |
//! | E | A signer listed twice is rejected |

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sb_02_message_inbox::{InboxError, MessageInboxApi, MessageStatus};
    use sb_03_operator_registry::{
        OperatorIdentityProof, OperatorRegistryApi, RegistryError, UNBONDING_PERIOD,
    };
    use sb_04_dispatch::test_helpers::sample_payload;
    use sb_04_dispatch::{BridgeConfig, BridgeError, BridgeEvent, ErrorKind};

    // =========================================================================
    // SCENARIO A: QUORUM OF ONE
    // =========================================================================

    #[test]
    fn scenario_a_single_signer_meets_half_quorum() {
        let mut h = Harness::with_operators(bridge_config(), 2);

        assert_eq!(h.bridge.registry().active_count(), 2);
        assert_eq!(h.bridge.registry().total_staked(), 2 * ETHER);
        assert_eq!(h.bridge.required_signers(), 1);

        let payload = sample_payload(1);
        let message_id = h.dispatch(&payload, &[0]).unwrap();

        assert!(h.bridge.is_nonce_used(1));
        let msg = h.bridge.inbox().get(&message_id).unwrap();
        assert_eq!(msg.status, MessageStatus::Pending);
        assert_eq!(msg.recipient, DESTINATION_BRIDGE);
        assert_eq!(msg.content, payload.content_hash());

        // Either operator alone is enough
        let message_id = h.dispatch(&sample_payload(2), &[1]).unwrap();
        assert!(h.bridge.is_message_pending(&message_id));
    }

    // =========================================================================
    // SCENARIO B: SLASHING SEQUENCE
    // =========================================================================

    #[test]
    fn scenario_b_slashes_compound_and_deactivate_at_minimum() {
        let mut h = Harness::default();
        let alice = h.add_operator_with_stake(ETHER).unwrap();
        let bob = h.add_operator_with_stake(ETHER).unwrap();
        let target = h.address(alice);
        let proof = OperatorIdentityProof::encode(&target);

        let mut remaining = Vec::new();
        for _ in 0..3 {
            let outcome = h
                .bridge
                .slash_operator(&h.ctx(OWNER), &target, &proof)
                .unwrap();
            remaining.push(outcome.remaining);
            h.advance(1);
        }

        assert_eq!(
            remaining,
            vec![800 * ETHER / 1_000, 640 * ETHER / 1_000, 512 * ETHER / 1_000]
        );
        // 0.8 is already below a one-ether minimum
        assert!(!h.bridge.registry().is_active(&target));
        assert_eq!(h.bridge.registry().active_operators(), vec![h.address(bob)]);
        assert_eq!(h.balance(&TREASURY), 488 * ETHER / 1_000);
        assert_eq!(
            h.bridge.registry().pending_withdrawal(&target).unwrap().amount,
            512 * ETHER / 1_000
        );
        assert_eq!(h.custody(), ETHER + 512 * ETHER / 1_000);
        assert!(h.bridge.registry().check_invariants().is_ok());
    }

    #[test]
    fn scenario_b_lower_minimum_deactivates_on_second_slash() {
        let mut h = Harness::new(BridgeConfig {
            minimum_stake: 700 * ETHER / 1_000,
            ..bridge_config()
        });
        let alice = h.add_operator_with_stake(ETHER).unwrap();
        let target = h.address(alice);
        let proof = OperatorIdentityProof::encode(&target);

        let first = h
            .bridge
            .slash_operator(&h.ctx(OWNER), &target, &proof)
            .unwrap();
        assert!(!first.deactivated);
        assert_eq!(h.bridge.registry().operator(&target).unwrap().stake, 800 * ETHER / 1_000);

        let second = h
            .bridge
            .slash_operator(&h.ctx(OWNER), &target, &proof)
            .unwrap();
        assert!(second.deactivated);
        assert_eq!(second.remaining, 640 * ETHER / 1_000);
        assert_eq!(h.bridge.registry().active_count(), 0);
        assert_eq!(h.bridge.registry().total_staked(), 0);
    }

    // =========================================================================
    // SCENARIO C: UNBONDING
    // =========================================================================

    #[test]
    fn scenario_c_withdrawal_unlocks_after_unbonding_period() {
        let mut h = Harness::with_operators(bridge_config(), 1);
        let operator = h.address(0);
        let deregistered_at = h.height;

        let withdrawal = h.bridge.deregister_operator(&h.ctx(operator)).unwrap();
        assert_eq!(withdrawal.unlock_height, deregistered_at + UNBONDING_PERIOD);

        h.advance(UNBONDING_PERIOD - 1);
        let err = h.bridge.complete_withdrawal(&h.ctx(operator)).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Registry(RegistryError::WithdrawalNotReady { .. })
        ));

        h.advance(1);
        let before = h.balance(&operator);
        assert_eq!(h.bridge.complete_withdrawal(&h.ctx(operator)), Ok(ETHER));
        assert_eq!(h.balance(&operator), before + ETHER);
        assert_eq!(h.bridge.registry().pending_withdrawal(&operator), None);

        // Nothing left to claim
        assert_eq!(
            h.bridge.complete_withdrawal(&h.ctx(operator)),
            Err(BridgeError::Registry(RegistryError::NoPendingWithdrawal(operator)))
        );
    }

    // =========================================================================
    // SCENARIO D: MESSAGE IDENTIFIER UNIQUENESS
    // =========================================================================

    #[test]
    fn scenario_d_identical_sends_get_distinct_ids() {
        let mut h = Harness::default();
        let fee = h.bridge.message_fee();
        let ctx = h.ctx(RELAYER).with_value(fee);
        let deadline = h.height + 1_000;

        let first = h
            .bridge
            .send_message(&ctx, [1; 32], [2; 32], [3; 32], deadline)
            .unwrap();
        let second = h
            .bridge
            .send_message(&ctx, [1; 32], [2; 32], [3; 32], deadline)
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(h.bridge.inbox().message_count(), 2);
        assert_eq!(h.bridge.inbox().escrowed_fees(), 2 * fee);
        assert!(h.bridge.is_message_pending(&first));
        assert!(h.bridge.is_message_pending(&second));
    }

    // =========================================================================
    // SCENARIO E: DUPLICATE SIGNER
    // =========================================================================

    #[test]
    fn scenario_e_duplicate_signer_rejected() {
        let mut h = Harness::with_operators(bridge_config(), 4);
        assert_eq!(h.bridge.required_signers(), 2);

        let payload = sample_payload(9);
        let events_before = h.bridge.events().len();
        let relayer_before = h.balance(&RELAYER);

        // Two genuine records from operator 0 posing as a quorum of two
        let err = h.dispatch(&payload, &[0, 0]).unwrap_err();
        assert_eq!(err, BridgeError::DuplicateSigner(h.address(0)));
        assert_eq!(err.kind(), ErrorKind::InputValidation);

        assert!(!h.bridge.is_nonce_used(9));
        assert_eq!(h.bridge.events().len(), events_before);
        assert_eq!(h.balance(&RELAYER), relayer_before);

        // The honest quorum still gets through afterwards
        h.dispatch(&payload, &[0, 1]).unwrap();
        assert!(matches!(
            h.bridge.events().last(),
            Some(BridgeEvent::DepositVerified { .. })
        ));
    }

    #[test]
    fn scenario_d_dispatches_share_counter_with_user_sends() {
        let mut h = Harness::with_operators(bridge_config(), 1);
        let fee = h.bridge.message_fee();
        let user = h
            .bridge
            .send_message(
                &h.ctx(RELAYER).with_value(fee),
                DESTINATION_BRIDGE,
                [2; 32],
                [3; 32],
                h.height + 7_200,
            )
            .unwrap();
        let relayed = h.dispatch(&sample_payload(1), &[0]).unwrap();

        assert_ne!(user, relayed);
        assert_eq!(h.bridge.inbox().message_count(), 2);
        assert!(matches!(
            h.bridge.cancel_message(&h.ctx(RELAYER), &relayed),
            Err(BridgeError::Inbox(InboxError::NotSender))
        ));
    }
}

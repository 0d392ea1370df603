//! # Integration Test Flows
//!
//! Multi-step lifecycles that cross every crate:
//!
//! 1. **Deposit relay**: operators bond, attest, relayer dispatches, a consumer
//!    delivers, the owner sweeps fees to the treasury
//! 2. **Operator churn**: quorum follows the active set as operators leave and
//!    rejoin
//! 3. **Administration**: ownership handover, pause, parameter changes
//! 4. **Configuration and telemetry**: JSON-loaded deployments and the
//!    metrics they leave behind

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use bridge_telemetry::{encode_metrics, DISPATCHES, SIGNATURE_VERIFICATIONS};
    use sb_01_signature_verification::{bls_test_helpers, AggregateSignatureVerifier};
    use sb_02_message_inbox::{MessageInboxApi, MessageStatus};
    use sb_03_operator_registry::{OperatorRegistryApi, RegistryError, UNBONDING_PERIOD};
    use sb_04_dispatch::test_helpers::{attest_aggregate, sample_payload};
    use sb_04_dispatch::{
        Bridge, BridgeConfig, BridgeError, BridgeEvent, ConfigParameter, DepositPayload,
    };
    use shared_types::{Asset, CallContext, InMemoryLedger, ValueLedger};

    // =========================================================================
    // DEPOSIT RELAY
    // =========================================================================

    #[test]
    fn test_deposit_relay_end_to_end() {
        let mut h = Harness::with_operators(bridge_config(), 3);
        let fee = h.bridge.message_fee();
        assert_eq!(h.bridge.required_signers(), 2);

        // Off-chain signer checks the nonce before attesting
        let payload = DepositPayload {
            source_tx_id: [0x51; 32],
            amount: 5 * ETHER,
            secret_hash: [0x52; 32],
            destination_address: [0x53; 32],
            nonce: 42,
            source_block_height: 812_004,
        };
        assert!(!h.bridge.is_nonce_used(payload.nonce));

        let message_id = h.dispatch(&payload, &[2, 0]).unwrap();
        assert_eq!(h.custody(), 3 * ETHER + fee);

        h.bridge
            .authorize_consumer(&h.ctx(OWNER), CONSUMER)
            .unwrap();
        h.advance(10);
        let delivered = h
            .bridge
            .consume_message(&h.ctx(CONSUMER), &message_id)
            .unwrap();
        assert_eq!(delivered.recipient, DESTINATION_BRIDGE);
        assert_eq!(delivered.secret_hash, payload.secret_hash);
        assert_eq!(delivered.content, payload.content_hash());
        assert_eq!(
            h.bridge.inbox().get(&message_id).unwrap().status,
            MessageStatus::Consumed
        );

        h.bridge
            .withdraw_fees(&h.ctx(OWNER), TREASURY, fee)
            .unwrap();
        assert_eq!(h.balance(&TREASURY), fee);
        assert_eq!(h.custody(), 3 * ETHER);

        let names: Vec<&str> = h
            .bridge
            .state()
            .events()
            .since(h.bridge.events().len() - 5)
            .iter()
            .map(BridgeEvent::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "MessageSent",
                "DepositVerified",
                "ConfigChanged",
                "MessageConsumed",
                "FeesWithdrawn"
            ]
        );
    }

    #[test]
    fn test_relay_with_aggregate_signatures() {
        let ledger = InMemoryLedger::new().with_balance(Asset::Native, RELAYER, STARTING_BALANCE);
        let mut bridge = Bridge::new(
            bridge_config(),
            OWNER,
            AggregateSignatureVerifier::new(),
            ledger,
        )
        .unwrap();

        let mut keys = Vec::new();
        let mut signers = Vec::new();
        for i in 0..4u8 {
            let (sk, _) = bls_test_helpers::generate_keypair();
            let operator = [0x40 + i; 20];
            let ctx = CallContext::new(operator, GENESIS_HEIGHT);
            bridge.ledger_mut().mint(Asset::Native, operator, ETHER);
            bridge
                .register_key(&ctx, &bls_test_helpers::key_material(&sk))
                .unwrap();
            bridge
                .register_operator(&ctx.with_value(ETHER), ETHER)
                .unwrap();
            keys.push(sk);
            signers.push(operator);
        }

        let payload = sample_payload(3);
        let quorum: Vec<_> = keys.iter().skip(1).take(2).collect();
        let blob = attest_aggregate(bridge.domain(), &payload, &quorum);
        let ctx = CallContext::new(RELAYER, GENESIS_HEIGHT).with_value(bridge.message_fee());

        let message_id = bridge
            .verify_and_dispatch(&ctx, &payload, &blob, &signers[1..3])
            .unwrap();
        assert!(bridge.is_message_pending(&message_id));
        assert!(bridge.is_nonce_used(3));
    }

    // =========================================================================
    // OPERATOR CHURN
    // =========================================================================

    #[test]
    fn test_quorum_follows_operator_churn() {
        let mut h = Harness::with_operators(bridge_config(), 4);
        assert_eq!(h.bridge.required_signers(), 2);

        // Two leave; one signature now suffices
        for i in [2, 3] {
            h.bridge.deregister_operator(&h.ctx(h.address(i))).unwrap();
        }
        assert_eq!(h.bridge.required_signers(), 1);
        h.dispatch(&sample_payload(1), &[1]).unwrap();

        // A departed operator no longer counts, even with a valid signature
        assert_eq!(
            h.dispatch(&sample_payload(2), &[0, 3]),
            Err(BridgeError::InactiveSigner(h.address(3)))
        );

        // Rejoining waits for the pending withdrawal to clear
        let rejoin = h.ctx(h.address(3)).with_value(ETHER);
        assert_eq!(
            h.bridge.register_operator(&rejoin, ETHER),
            Err(BridgeError::Registry(RegistryError::WithdrawalPending(h.address(3))))
        );

        h.advance(UNBONDING_PERIOD);
        h.bridge.complete_withdrawal(&h.ctx(h.address(3))).unwrap();
        let rejoin = h.ctx(h.address(3)).with_value(ETHER);
        h.bridge.register_operator(&rejoin, ETHER).unwrap();

        assert_eq!(h.bridge.registry().active_count(), 3);
        assert_eq!(h.bridge.registry().operators().len(), 4);
        assert_eq!(h.bridge.required_signers(), 2);
        h.dispatch(&sample_payload(2), &[0, 3]).unwrap();
        assert!(h.bridge.registry().check_invariants().is_ok());
    }

    #[test]
    fn test_operator_cap_blocks_new_registrations() {
        let mut h = Harness::with_operators(bridge_config(), 2);
        h.bridge.set_operator_cap(&h.ctx(OWNER), 2).unwrap();

        let err = h.add_operator_with_stake(ETHER).unwrap_err();
        assert_eq!(
            err,
            BridgeError::Registry(RegistryError::OperatorCapReached { cap: 2 })
        );

        h.dispatch(&sample_payload(1), &[0, 1]).unwrap();
    }

    #[test]
    fn test_lowered_cap_keeps_full_quorum_reachable() {
        let mut h = Harness::with_operators(
            BridgeConfig {
                quorum_bps: 10_000,
                ..bridge_config()
            },
            3,
        );
        h.bridge.set_operator_cap(&h.ctx(OWNER), 1).unwrap();
        assert_eq!(h.bridge.required_signers(), 3);

        let id = h.dispatch(&sample_payload(1), &[0, 1, 2]).unwrap();
        assert!(h.bridge.is_message_pending(&id));
        assert_eq!(h.bridge.registry().active_count(), 3);
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    #[test]
    fn test_ownership_handover_moves_admin_rights() {
        let mut h = Harness::with_operators(bridge_config(), 2);
        let successor = [0x5E; 20];

        h.bridge
            .transfer_ownership(&h.ctx(OWNER), successor)
            .unwrap();
        // Not effective until accepted
        h.bridge.set_quorum_bps(&h.ctx(OWNER), 10_000).unwrap();
        h.bridge.accept_ownership(&h.ctx(successor)).unwrap();

        assert_eq!(
            h.bridge.set_quorum_bps(&h.ctx(OWNER), 5_000),
            Err(BridgeError::NotOwner(OWNER))
        );
        let proof = sb_03_operator_registry::OperatorIdentityProof::encode(&h.address(0));
        assert_eq!(
            h.bridge
                .slash_operator(&h.ctx(OWNER), &h.address(0), &proof)
                .unwrap_err(),
            BridgeError::NotOwner(OWNER)
        );

        h.bridge.set_quorum_bps(&h.ctx(successor), 5_000).unwrap();
        assert_eq!(h.bridge.required_signers(), 1);
        assert_eq!(
            h.bridge.events().last(),
            Some(&BridgeEvent::ConfigChanged {
                parameter: ConfigParameter::QuorumBps(5_000)
            })
        );
    }

    #[test]
    fn test_pause_window_keeps_exits_open() {
        let mut h = Harness::with_operators(bridge_config(), 2);
        let fee = h.bridge.message_fee();
        let deadline = h.height + 100;
        let message_id = h
            .bridge
            .send_message(&h.ctx(RELAYER).with_value(fee), [7; 32], [8; 32], [9; 32], deadline)
            .unwrap();
        h.bridge.deregister_operator(&h.ctx(h.address(1))).unwrap();

        h.bridge.pause(&h.ctx(OWNER)).unwrap();
        assert_eq!(h.dispatch(&sample_payload(1), &[0]), Err(BridgeError::Paused));
        assert_eq!(h.add_operator_with_stake(ETHER), Err(BridgeError::Paused));

        h.advance(UNBONDING_PERIOD);
        assert_eq!(
            h.bridge.cancel_message(&h.ctx(RELAYER), &message_id),
            Ok(fee)
        );
        assert_eq!(
            h.bridge.complete_withdrawal(&h.ctx(h.address(1))),
            Ok(ETHER)
        );

        h.bridge.unpause(&h.ctx(OWNER)).unwrap();
        h.dispatch(&sample_payload(1), &[0]).unwrap();
    }

    #[test]
    fn test_message_fee_change_applies_to_both_paths() {
        let mut h = Harness::with_operators(bridge_config(), 1);
        let new_fee = 2 * h.bridge.message_fee();
        h.bridge
            .set_message_fee(&h.ctx(OWNER), new_fee)
            .unwrap();

        let old_fee_ctx = h.ctx(RELAYER).with_value(new_fee / 2);
        assert!(matches!(
            h.bridge
                .send_message(&old_fee_ctx, [1; 32], [1; 32], [1; 32], h.height + 100),
            Err(BridgeError::Inbox(_))
        ));

        let message_id = h.dispatch(&sample_payload(1), &[0]).unwrap();
        assert_eq!(h.bridge.inbox().get(&message_id).unwrap().fee, new_fee);
    }

    // =========================================================================
    // CONFIGURATION AND TELEMETRY
    // =========================================================================

    #[test]
    fn test_deployment_from_json_config() {
        let json = r#"{
            "name": "SentinelBridge",
            "version": "1",
            "chain_id": 11155111,
            "minimum_stake": 1000,
            "quorum_bps": 6667,
            "destination_bridge": "0x00000000000000000000000000000000000000000000000000000000000000aa"
        }"#;
        let config = BridgeConfig::from_json_str(json).unwrap();
        assert_eq!(config.chain_id, 11_155_111);

        let mut h = Harness::new(config);
        for _ in 0..3 {
            h.add_operator();
        }
        assert_eq!(h.bridge.required_signers(), 3);
        // Zero treasury in config falls back to the owner
        assert_eq!(h.bridge.registry().config().treasury, OWNER);

        let payload = sample_payload(1);
        let message_id = h.dispatch(&payload, &[0, 1, 2]).unwrap();
        let msg = h.bridge.inbox().get(&message_id).unwrap();
        assert_eq!(msg.recipient[31], 0xAA);
    }

    #[test]
    fn test_dispatch_metrics_recorded() {
        let accepted = DISPATCHES.with_label_values(&["accepted"]);
        let invalid = SIGNATURE_VERIFICATIONS.with_label_values(&["recoverable", "invalid"]);
        let (accepted_before, invalid_before) = (accepted.get(), invalid.get());

        let mut h = Harness::with_operators(bridge_config(), 2);
        h.dispatch(&sample_payload(1), &[0]).unwrap();

        let payload = sample_payload(2);
        let (blob, _) = h.attest(&payload, &[1]);
        let ctx = h.ctx(RELAYER).with_value(h.bridge.message_fee());
        assert_eq!(
            h.bridge
                .verify_and_dispatch(&ctx, &payload, &blob, &[h.address(0)]),
            Err(BridgeError::SignatureVerificationFailed)
        );

        // Counters are process-wide; other tests may add to them concurrently
        assert!(accepted.get() >= accepted_before + 1.0);
        assert!(invalid.get() >= invalid_before + 1.0);

        let _ = bridge_telemetry::register_metrics();
        let text = encode_metrics().unwrap();
        assert!(text.contains("sb_dispatch_attempts_total"));
    }
}

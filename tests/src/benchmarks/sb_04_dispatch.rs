//! # SB-04 Dispatch Benchmarks
//!
//! End-to-end `verify_and_dispatch` cost, signature checks included, as the
//! active operator set grows under a two-thirds quorum. Each iteration uses
//! a fresh nonce so nothing short-circuits on replay.

use crate::fixtures::{bridge_config, Harness, ETHER, RELAYER};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use sb_04_dispatch::test_helpers::sample_payload;
use sb_04_dispatch::{BridgeConfig, DepositPayload};
use shared_types::Asset;
use std::time::Duration;

const OPERATOR_COUNTS: [usize; 3] = [3, 15, 60];

pub fn verify_and_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-04/verify_and_dispatch");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for operators in OPERATOR_COUNTS {
        let config = BridgeConfig {
            quorum_bps: 6_667,
            ..bridge_config()
        };
        let mut h = Harness::with_operators(config, operators);
        // Enough fees for however many iterations criterion picks
        h.bridge
            .ledger_mut()
            .mint(Asset::Native, RELAYER, u64::MAX as u128 * ETHER);
        let quorum: Vec<usize> = (0..h.bridge.required_signers()).collect();
        let mut nonce = 0u64;

        group.throughput(Throughput::Elements(quorum.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("operators", operators),
            &quorum,
            |b, quorum| {
                b.iter(|| {
                    nonce += 1;
                    black_box(h.dispatch(&sample_payload(nonce), quorum).is_ok())
                })
            },
        );
    }

    group.finish();
}

/// Validation only: what a relayer pays to pre-flight a dispatch.
pub fn validate_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-04/validate_dispatch");

    let h = Harness::with_operators(bridge_config(), 15);
    let quorum: Vec<usize> = (0..h.bridge.required_signers()).collect();
    let payload = sample_payload(1);
    let (blob, signers) = h.attest(&payload, &quorum);
    let ctx = h.ctx(RELAYER).with_value(h.bridge.message_fee());

    group.bench_function("quorum_of_15", |b| {
        b.iter(|| {
            black_box(
                h.bridge
                    .validate_dispatch(&ctx, &payload, &blob, &signers)
                    .is_ok(),
            )
        })
    });

    group.finish();
}

/// Typed-data hashing alone.
pub fn payload_digest(c: &mut Criterion) {
    let h = Harness::default();
    let payload: DepositPayload = sample_payload(7);

    c.bench_function("sb-04/payload_digest", |b| {
        b.iter(|| black_box(h.bridge.digest(black_box(&payload))))
    });
}

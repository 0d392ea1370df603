//! # SB-01 Signature Verification Benchmarks
//!
//! Quorum verification cost as the signer set grows, for both schemes:
//! - Recoverable: one recovery per record, records checked in parallel
//! - Aggregate: one pairing check regardless of signer count
//!
//! The adversarial case flips a byte in the last record so every batch
//! runs to the end before failing.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use sb_01_signature_verification::{
    bls_test_helpers, ecdsa_test_helpers, AggregateSignatureVerifier,
    RecoverableSignatureVerifier, SignatureScheme,
};
use shared_types::{Address, Hash};
use std::time::Duration;

const SIGNER_COUNTS: [usize; 4] = [1, 8, 32, 100];

fn random_digest() -> Hash {
    let mut digest = [0u8; 32];
    rand::thread_rng().fill(&mut digest);
    digest
}

/// Verifier with `count` registered keys and a blob signed by all of them.
fn recoverable_quorum(
    count: usize,
    digest: &Hash,
) -> (RecoverableSignatureVerifier, Vec<u8>, Vec<Address>) {
    let mut scheme = RecoverableSignatureVerifier::new();
    let keys: Vec<_> = (0..count)
        .map(|_| ecdsa_test_helpers::generate_keypair().0)
        .collect();
    let signers: Vec<Address> = keys.iter().map(ecdsa_test_helpers::address_of).collect();

    for (key, signer) in keys.iter().zip(&signers) {
        scheme
            .register_key(*signer, &ecdsa_test_helpers::public_key_bytes(key))
            .expect("fresh key registers");
    }
    let key_refs: Vec<_> = keys.iter().collect();
    let blob = ecdsa_test_helpers::sign_blob(digest, &key_refs);
    (scheme, blob, signers)
}

fn aggregate_quorum(
    count: usize,
    digest: &Hash,
) -> (AggregateSignatureVerifier, Vec<u8>, Vec<Address>) {
    let mut scheme = AggregateSignatureVerifier::new();
    let keys: Vec<_> = (0..count)
        .map(|_| bls_test_helpers::generate_keypair().0)
        .collect();
    let signers: Vec<Address> = (0..count)
        .map(|i| {
            let mut addr = [0u8; 20];
            addr[..8].copy_from_slice(&(i as u64).to_be_bytes());
            addr
        })
        .collect();

    for (key, signer) in keys.iter().zip(&signers) {
        scheme
            .register_key(*signer, &bls_test_helpers::key_material(key))
            .expect("fresh key registers");
    }
    let key_refs: Vec<_> = keys.iter().collect();
    let blob = bls_test_helpers::sign_blob(digest, &key_refs);
    (scheme, blob, signers)
}

pub fn recoverable_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-01/recoverable");
    group.measurement_time(Duration::from_secs(10));

    for count in SIGNER_COUNTS {
        let digest = random_digest();
        let (scheme, blob, signers) = recoverable_quorum(count, &digest);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("verify_quorum", count),
            &(blob.clone(), signers.clone()),
            |b, (blob, signers)| b.iter(|| black_box(scheme.verify(&digest, blob, signers))),
        );

        // Corrupt the last record's s value
        let mut bad = blob;
        let last = bad.len() - 2;
        bad[last] ^= 0x01;
        group.bench_with_input(
            BenchmarkId::new("reject_last_record", count),
            &(bad, signers),
            |b, (blob, signers)| b.iter(|| black_box(scheme.verify(&digest, blob, signers))),
        );
    }

    group.finish();
}

pub fn aggregate_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-01/aggregate");
    group.measurement_time(Duration::from_secs(10));

    for count in SIGNER_COUNTS {
        let digest = random_digest();
        let (scheme, blob, signers) = aggregate_quorum(count, &digest);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("verify_quorum", count),
            &(blob, signers),
            |b, (blob, signers)| b.iter(|| black_box(scheme.verify(&digest, blob, signers))),
        );
    }

    group.finish();
}

pub fn key_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("sb-01/register_key");

    let (ecdsa_key, _) = ecdsa_test_helpers::generate_keypair();
    let ecdsa_owner = ecdsa_test_helpers::address_of(&ecdsa_key);
    let ecdsa_material = ecdsa_test_helpers::public_key_bytes(&ecdsa_key);
    group.bench_function("recoverable", |b| {
        b.iter(|| {
            let mut scheme = RecoverableSignatureVerifier::new();
            black_box(scheme.register_key(ecdsa_owner, &ecdsa_material).is_ok())
        })
    });

    // Includes the proof-of-possession pairing check
    let (bls_key, _) = bls_test_helpers::generate_keypair();
    let bls_material = bls_test_helpers::key_material(&bls_key);
    group.bench_function("aggregate_with_pop", |b| {
        b.iter(|| {
            let mut scheme = AggregateSignatureVerifier::new();
            black_box(scheme.register_key([1u8; 20], &bls_material).is_ok())
        })
    });

    group.finish();
}

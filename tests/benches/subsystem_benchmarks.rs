//! # Sentinel Bridge Subsystem Benchmarks
//!
//! | Subsystem | Workload |
//! |-----------|----------|
//! | sb-01 Signature Verification | Quorum blobs of 1 to 100 signers, both schemes |
//! | sb-01 Signature Verification | Key registration (with proof of possession) |
//! | sb-04 Dispatch | Full `verify_and_dispatch` at 3, 15 and 60 operators |
//! | sb-04 Dispatch | Pre-flight validation and typed-data digest |

use criterion::{criterion_group, criterion_main};
use sb_tests::benchmarks::{sb_01_signature, sb_04_dispatch};

criterion_group!(
    benches,
    sb_01_signature::recoverable_verification,
    sb_01_signature::aggregate_verification,
    sb_01_signature::key_registration,
    sb_04_dispatch::verify_and_dispatch,
    sb_04_dispatch::validate_dispatch,
    sb_04_dispatch::payload_digest,
);

criterion_main!(benches);

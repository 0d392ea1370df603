//! # Sentinel Bridge Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Bridge harness with funded operators
//! ├── benchmarks/       # Criterion workloads per subsystem
//! │   ├── sb_01_signature.rs
//! │   └── sb_04_dispatch.rs
//! │
//! └── integration/      # Cross-crate behaviour
//!     ├── scenarios.rs  # Reference scenarios A-E
//!     ├── flows.rs      # Multi-step lifecycles through the bridge
//!     └── properties.rs # proptest invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sb-tests
//!
//! # By category
//! cargo test -p sb-tests integration::scenarios::
//! cargo test -p sb-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p sb-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod integration;

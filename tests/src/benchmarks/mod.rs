//! # Sentinel Bridge Benchmarks
//!
//! Criterion workloads per subsystem, wired up in
//! `benches/subsystem_benchmarks.rs`.

pub mod sb_01_signature;
pub mod sb_04_dispatch;

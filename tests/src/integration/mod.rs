//! # Cross-Crate Integration
//!
//! Everything here drives the bridge through its public surface only: the
//! same calls an operator, relayer, consumer or administrator would make.

pub mod flows;
pub mod properties;
pub mod scenarios;

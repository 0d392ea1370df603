//! # Quorum and Penalty Arithmetic

use shared_types::{Amount, BPS_DENOMINATOR};

/// Signatures a dispatch needs: `max(1, ceil(active * quorum_bps / 10_000))`.
pub fn required_signers(active_count: usize, quorum_bps: u32) -> usize {
    let denominator = BPS_DENOMINATOR as u128;
    let scaled = active_count as u128 * quorum_bps as u128;
    let required = scaled.div_ceil(denominator);
    usize::try_from(required).unwrap_or(usize::MAX).max(1)
}

/// Penalty for one slash: `min(balance, floor(balance * slash_bps / 10_000))`.
///
/// Split into quotient and remainder so the product never overflows.
pub fn slash_penalty(balance: Amount, slash_bps: u32) -> Amount {
    let denominator = BPS_DENOMINATOR as Amount;
    let bps = slash_bps as Amount;
    let penalty = (balance / denominator) * bps + (balance % denominator) * bps / denominator;
    penalty.min(balance)
}

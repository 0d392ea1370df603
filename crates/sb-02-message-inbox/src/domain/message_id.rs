//! # Message Identifiers
//!
//! `keccak256(abi.encode(sender, recipient, content, secret_hash, deadline,
//! counter, chain_id))`. The counter makes ids unique across identical
//! payloads; the chain id keeps them unique across deployments.

use super::entities::MessageId;
use shared_types::{AbiEncoder, Address, BlockHeight, Bytes32, ChainId, Hash};

/// Derive the id of the `counter`-th message.
pub fn compute_message_id(
    sender: &Address,
    recipient: &Bytes32,
    content: &Hash,
    secret_hash: &Hash,
    deadline: BlockHeight,
    counter: u64,
    chain_id: ChainId,
) -> MessageId {
    AbiEncoder::new()
        .address(sender)
        .bytes32(recipient)
        .bytes32(content)
        .bytes32(secret_hash)
        .uint(deadline)
        .uint(counter)
        .uint(chain_id)
        .hash()
}

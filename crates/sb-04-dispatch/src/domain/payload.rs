//! # Attestation Payload
//!
//! Typed structured-data hashing of deposit attestations. Operators sign
//! `keccak256(0x19 0x01 || domainSeparator || structHash)`; the domain binds
//! the digest to one bridge deployment on one chain.

use serde::{Deserialize, Serialize};
use shared_types::{keccak256, AbiEncoder, Address, Amount, Bytes32, ChainId, Hash};

/// Type descriptor of the signed struct.
pub const DEPOSIT_PAYLOAD_TYPE: &str = "DepositPayload(bytes32 sourceTxId,uint256 amount,bytes32 secretHash,bytes32 destinationAddress,uint64 nonce,uint32 sourceBlockHeight)";

/// Type descriptor of the signing domain.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// A deposit observed on the source chain, as attested by operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPayload {
    /// Source-chain transaction that carried the deposit.
    pub source_tx_id: Hash,
    /// Deposited amount in base units.
    pub amount: Amount,
    /// Hashlock the destination chain releases against.
    pub secret_hash: Hash,
    /// Destination-chain recipient.
    pub destination_address: Bytes32,
    /// Replay-protection nonce chosen by the attesting side.
    pub nonce: u64,
    /// Source-chain height of the deposit.
    pub source_block_height: u32,
}

impl DepositPayload {
    /// `hashStruct(payload)`.
    pub fn struct_hash(&self) -> Hash {
        AbiEncoder::new()
            .bytes32(&keccak256(DEPOSIT_PAYLOAD_TYPE.as_bytes()))
            .bytes32(&self.source_tx_id)
            .uint(self.amount)
            .bytes32(&self.secret_hash)
            .bytes32(&self.destination_address)
            .uint(self.nonce)
            .uint(self.source_block_height)
            .hash()
    }

    /// Content hash carried by the outbound inbox message.
    pub fn content_hash(&self) -> Hash {
        AbiEncoder::new()
            .uint(self.amount)
            .bytes32(&self.secret_hash)
            .bytes32(&self.destination_address)
            .bytes32(&self.source_tx_id)
            .hash()
    }
}

/// Signing domain of one bridge deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: ChainId,
    /// The bridge's own identity.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// `hashStruct(domain)`.
    pub fn separator(&self) -> Hash {
        AbiEncoder::new()
            .bytes32(&keccak256(EIP712_DOMAIN_TYPE.as_bytes()))
            .bytes32(&keccak256(self.name.as_bytes()))
            .bytes32(&keccak256(self.version.as_bytes()))
            .uint(self.chain_id)
            .address(&self.verifying_contract)
            .hash()
    }

    /// Digest operators sign for `payload` under this domain.
    pub fn digest(&self, payload: &DepositPayload) -> Hash {
        typed_data_digest(&self.separator(), &payload.struct_hash())
    }
}

/// `keccak256(0x19 0x01 || domain_separator || struct_hash)`.
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    let mut buf = [0u8; 66];
    buf[0] = 0x19;
    buf[1] = 0x01;
    buf[2..34].copy_from_slice(domain_separator);
    buf[34..].copy_from_slice(struct_hash);
    keccak256(&buf)
}

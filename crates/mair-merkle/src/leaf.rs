use mair_core::base::{ADDRESS_SIZE, AMOUNT_WORD_SIZE, Address, Amount, amount_word};
use mair_core::schema::allocation::AllocationEntry;
use sha3::{Digest, Keccak256};

use crate::MerkleNode;

/// Size of the hashed leaf preimage: a 20-byte address followed by a 32-byte amount word.
pub const LEAF_PREIMAGE_SIZE: usize = ADDRESS_SIZE.saturating_add(AMOUNT_WORD_SIZE);

/// Encode an allocation entry into its leaf.
///
/// `keccak256(address || amount_be32)`, the same value Solidity produces for
/// `keccak256(abi.encodePacked(address, uint256))`.
#[must_use]
pub fn encode_leaf(address: &Address, amount: Amount) -> MerkleNode {
    MerkleNode::new(
        Keccak256::new()
            .chain_update(address.to_bytes())
            .chain_update(amount_word(amount))
            .finalize()
            .into(),
    )
}

/// Types that hash to a Merkle leaf.
pub trait LeafEncode {
    /// The leaf this value commits to.
    fn leaf(&self) -> MerkleNode;
}

impl LeafEncode for AllocationEntry {
    fn leaf(&self) -> MerkleNode {
        encode_leaf(&self.address, self.amount)
    }
}

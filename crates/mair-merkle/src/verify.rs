//! Stateless proof verification.

use mair_core::base::{Address, Amount};

use crate::{MerkleNode, MerkleRoot, encode_leaf};

/// Recompute the root implied by `leaf` and its sibling path.
#[must_use]
pub fn compute_root(leaf: &MerkleNode, proof: &[MerkleNode]) -> MerkleRoot {
    proof
        .iter()
        .fold(*leaf, |node, sibling| MerkleNode::combine(&node, sibling))
}

/// Check that `leaf` is committed to by `root`.
#[must_use]
pub fn verify(leaf: &MerkleNode, proof: &[MerkleNode], root: &MerkleRoot) -> bool {
    compute_root(leaf, proof) == *root
}

/// Check that the allocation `(address, amount)` is committed to by `root`.
#[must_use]
pub fn verify_entry(
    address: &Address,
    amount: Amount,
    proof: &[MerkleNode],
    root: &MerkleRoot,
) -> bool {
    verify(&encode_leaf(address, amount), proof, root)
}

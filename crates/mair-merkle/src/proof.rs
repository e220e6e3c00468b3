use mair_core::base::HASH_SIZE;

use crate::MerkleNode;

/// Inclusion proof: sibling hashes ordered from the leaf level upward.
///
/// Levels where the path node had no sibling contribute nothing, so the proof of a leaf in
/// a tree of `n` leaves has at most `ceil(log2(n))` entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MerkleProof(Vec<MerkleNode>);

impl MerkleProof {
    /// Create a proof from sibling nodes.
    #[must_use]
    pub const fn new(siblings: Vec<MerkleNode>) -> Self {
        Self(siblings)
    }

    /// Sibling nodes, leaf level first.
    #[must_use]
    pub fn siblings(&self) -> &[MerkleNode] {
        &self.0
    }

    /// Number of siblings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof is empty (a single-leaf tree).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw sibling bytes, as stored in a proofs file.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<[u8; HASH_SIZE]> {
        self.0.iter().map(MerkleNode::to_bytes).collect()
    }
}

impl From<Vec<[u8; HASH_SIZE]>> for MerkleProof {
    fn from(siblings: Vec<[u8; HASH_SIZE]>) -> Self {
        Self(siblings.into_iter().map(MerkleNode::new).collect())
    }
}

impl From<&[[u8; HASH_SIZE]]> for MerkleProof {
    fn from(siblings: &[[u8; HASH_SIZE]]) -> Self {
        Self(siblings.iter().copied().map(MerkleNode::new).collect())
    }
}

impl AsRef<[MerkleNode]> for MerkleProof {
    fn as_ref(&self) -> &[MerkleNode] {
        &self.0
    }
}

//! Merkle tree node type.
//!
//! Internal nodes hash the concatenation of their children ordered bytewise, which makes
//! the combination commutative: a verifier only needs the sibling, never its side.

use std::fmt;
use std::str::FromStr;

use mair_core::base::{HASH_SIZE, decode_prefixed_hex};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use sha3::{Digest, Keccak256};

/// A 32-byte node of the allocation tree: either a leaf hash or an internal hash.
///
/// Renders and serializes as `0x`-prefixed hex.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, SerializeDisplay, DeserializeFromStr,
)]
pub struct MerkleNode([u8; HASH_SIZE]);

/// The top node of a tree, published as the commitment.
pub type MerkleRoot = MerkleNode;

impl MerkleNode {
    /// The zero node (all zeros). Never a valid commitment.
    pub const ZERO: Self = Self([0_u8; HASH_SIZE]);

    /// Create a new node from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// Whether this is the all-zero node.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Combines two nodes into their parent.
    ///
    /// The smaller child (bytewise) is hashed first, so `combine(a, b) == combine(b, a)`.
    #[must_use]
    pub fn combine(lhs: &Self, rhs: &Self) -> Self {
        let (low, high) = if lhs <= rhs { (lhs, rhs) } else { (rhs, lhs) };
        Self(
            Keccak256::new()
                .chain_update(low.0)
                .chain_update(high.0)
                .finalize()
                .into(),
        )
    }
}

impl From<[u8; HASH_SIZE]> for MerkleNode {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<MerkleNode> for [u8; HASH_SIZE] {
    fn from(node: MerkleNode) -> Self {
        node.0
    }
}

impl AsRef<[u8]> for MerkleNode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MerkleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for MerkleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MerkleNode({self})")
    }
}

impl FromStr for MerkleNode {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_prefixed_hex(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const LEAF_A: [u8; 32] = hex!("4f2aefca2998f6aa2ab6799857a78dad717148458baa694d613c74251a29f216");
    const LEAF_B: [u8; 32] = hex!("7a10cfda5e9b2c0b4e2b98d253b1f1b38d27b63642bc2dfc72471e863437348f");

    #[test]
    fn zero_node() {
        assert!(MerkleNode::ZERO.is_zero());
        assert_eq!(MerkleNode::default(), MerkleNode::ZERO);
        assert_eq!(<[u8; 32]>::from(MerkleNode::ZERO), [0_u8; 32]);
        assert!(!MerkleNode::new(LEAF_A).is_zero());
    }

    #[test]
    fn combine_is_order_independent() {
        let a = MerkleNode::new(LEAF_A);
        let b = MerkleNode::new(LEAF_B);

        assert_eq!(MerkleNode::combine(&a, &b), MerkleNode::combine(&b, &a));
    }

    #[test]
    fn combine_matches_known_vector() {
        let parent = MerkleNode::combine(&MerkleNode::new(LEAF_B), &MerkleNode::new(LEAF_A));
        assert_eq!(
            parent.to_bytes(),
            hex!("46451dfcfffe56da3b9019027cda3f4cf0db85034ab47952da3a8db11d19dae3")
        );
    }

    #[test]
    fn display_is_prefixed_hex() {
        let node = MerkleNode::new([0xab; 32]);
        assert_eq!(node.to_string(), format!("0x{}", "ab".repeat(32)));
        assert_eq!(node.to_string().parse::<MerkleNode>(), Ok(node));
        assert_eq!("ab".repeat(32).parse::<MerkleNode>(), Ok(node));
        assert!("0xabab".parse::<MerkleNode>().is_err());

        let json = serde_json::to_string(&node).expect("serialize");
        assert_eq!(serde_json::from_str::<MerkleNode>(&json).expect("deserialize"), node);
    }
}

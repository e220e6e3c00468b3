//! Merkle commitment scheme for allocation lists.
//!
//! Leaves are `keccak256(address || uint256 amount)` and internal nodes hash their two
//! children in sorted order, so a proof is a plain list of siblings without direction bits.
//! Roots are therefore compatible with the usual EVM `MerkleProof` verifiers.

mod error;
mod leaf;
mod node;
mod proof;
mod tree;
mod verify;

pub use error::MerkleError;
pub use leaf::{LEAF_PREIMAGE_SIZE, LeafEncode, encode_leaf};
pub use node::{MerkleNode, MerkleRoot};
pub use proof::MerkleProof;
pub use tree::MerkleTree;
pub use verify::{compute_root, verify, verify_entry};

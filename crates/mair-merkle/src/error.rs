use mair_core::base::Address;
use thiserror::Error;

/// Errors that can occur when building a Merkle tree or requesting proofs from it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MerkleError {
    /// The allocation list contains no entries.
    #[error("Allocation list is empty")]
    EmptyAllocation,

    /// The same address appears more than once.
    #[error("Duplicate recipient {0}")]
    DuplicateRecipient(Address),

    /// An entry allocates nothing.
    #[error("Zero amount allocated to {0}")]
    ZeroAmount(Address),

    /// A proof was requested for an address that is not part of the tree.
    #[error("Recipient {0} is not part of the tree")]
    UnknownRecipient(Address),

    /// A proof was requested for a leaf position past the end of the tree.
    #[error("Leaf index {index} out of range for a tree of {len} leaves")]
    IndexOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },

    /// The allocated amounts do not fit into an `Amount`.
    #[error("Total allocated amount overflows")]
    AmountOverflow,
}

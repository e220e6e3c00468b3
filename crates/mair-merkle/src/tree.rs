//! Dense allocation tree with every level materialized.

use std::collections::BTreeMap;

use mair_core::base::{Address, Amount};
use mair_core::schema::allocation::AllocationEntry;
use mair_core::schema::proofs::{ClaimProofEntry, ClaimProofsFile};

use crate::{LeafEncode, MerkleError, MerkleNode, MerkleProof, MerkleRoot};

/// A Merkle tree built over an allocation list.
///
/// Level 0 holds the leaves in allocation order. Each following level combines adjacent
/// pairs; a trailing node without a partner is promoted unchanged. The last level holds
/// only the root.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    entries: Vec<AllocationEntry>,
    positions: BTreeMap<Address, usize>,
    levels: Vec<Vec<MerkleNode>>,
    root: MerkleRoot,
    total_amount: Amount,
}

impl MerkleTree {
    /// Build the tree over `entries`.
    ///
    /// # Errors
    /// Returns an error if the list is empty, repeats an address, allocates a zero amount or
    /// allocates more than `Amount::MAX` in total.
    pub fn build(entries: impl IntoIterator<Item = AllocationEntry>) -> Result<Self, MerkleError> {
        let entries: Vec<AllocationEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(MerkleError::EmptyAllocation);
        }

        let mut positions = BTreeMap::new();
        let mut total_amount: Amount = 0;
        for (position, entry) in entries.iter().enumerate() {
            if entry.amount == 0 {
                return Err(MerkleError::ZeroAmount(entry.address));
            }
            if positions.insert(entry.address, position).is_some() {
                return Err(MerkleError::DuplicateRecipient(entry.address));
            }
            total_amount = total_amount
                .checked_add(entry.amount)
                .ok_or(MerkleError::AmountOverflow)?;
        }

        let levels = build_levels(entries.iter().map(LeafEncode::leaf).collect());
        let root = levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .ok_or(MerkleError::EmptyAllocation)?;

        Ok(Self {
            entries,
            positions,
            levels,
            root,
            total_amount,
        })
    }

    /// The committed root.
    #[must_use]
    pub const fn root(&self) -> MerkleRoot {
        self.root
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a tree is never built over an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of hashing levels above the leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Entries in allocation order.
    #[must_use]
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    /// Sum of all allocated amounts.
    #[must_use]
    pub const fn total_amount(&self) -> Amount {
        self.total_amount
    }

    /// Leaf nodes in allocation order.
    #[must_use]
    pub fn leaves(&self) -> &[MerkleNode] {
        self.levels.first().map_or(&[], Vec::as_slice)
    }

    /// Inclusion proof for `address`.
    ///
    /// # Errors
    /// Returns [`MerkleError::UnknownRecipient`] if the address is not in the tree.
    pub fn proof(&self, address: &Address) -> Result<MerkleProof, MerkleError> {
        let index = self
            .positions
            .get(address)
            .copied()
            .ok_or(MerkleError::UnknownRecipient(*address))?;
        Ok(self.siblings(index))
    }

    /// Inclusion proof for the leaf at `index`.
    ///
    /// # Errors
    /// Returns [`MerkleError::IndexOutOfRange`] if the index is past the last leaf.
    pub fn proof_at(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.siblings(index))
    }

    /// Inclusion proofs for every recipient.
    #[must_use]
    pub fn proofs(&self) -> BTreeMap<Address, MerkleProof> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.address, self.siblings(index)))
            .collect()
    }

    /// Everything a recipient needs to claim, in allocation order.
    #[must_use]
    pub fn claim_proofs(&self) -> ClaimProofsFile {
        let claims = self
            .entries
            .iter()
            .zip(self.leaves())
            .enumerate()
            .map(|(index, (entry, leaf))| ClaimProofEntry {
                address: entry.address,
                amount: entry.amount,
                leaf: leaf.to_bytes(),
                proof: self.siblings(index).to_bytes(),
            })
            .collect();

        ClaimProofsFile {
            merkle_root: self.root.to_bytes(),
            claims,
        }
    }

    fn siblings(&self, leaf_index: usize) -> MerkleProof {
        let mut index = leaf_index;
        let mut siblings = Vec::with_capacity(self.depth());
        for level in &self.levels {
            if let Some(sibling) = level.get(index ^ 1) {
                siblings.push(*sibling);
            }
            index /= 2;
        }
        MerkleProof::new(siblings)
    }
}

fn build_levels(leaves: Vec<MerkleNode>) -> Vec<Vec<MerkleNode>> {
    let mut levels = vec![leaves];
    loop {
        let Some(current) = levels.last() else {
            break;
        };
        if current.len() <= 1 {
            break;
        }
        let next = current
            .chunks(2)
            .filter_map(|pair| {
                let (left, rest) = pair.split_first()?;
                Some(
                    rest.first()
                        .map_or(*left, |right| MerkleNode::combine(left, right)),
                )
            })
            .collect();
        levels.push(next);
    }
    levels
}

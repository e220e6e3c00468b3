use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::base::{Address, Amount, HASH_SIZE, PrefixedHex};

/// Proofs for every recipient of a distribution, handed out after the tree is built.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimProofsFile {
    /// Root the proofs were generated against.
    #[serde_as(as = "PrefixedHex")]
    pub merkle_root: [u8; HASH_SIZE],
    /// One entry per recipient, in allocation-list order.
    pub claims: Vec<ClaimProofEntry>,
}

/// A single recipient's claim data.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimProofEntry {
    /// Recipient address.
    pub address: Address,
    /// Allocated amount, as a decimal string.
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    /// Leaf hash of `(address, amount)`.
    #[serde_as(as = "PrefixedHex")]
    pub leaf: [u8; HASH_SIZE],
    /// Sibling hashes from the leaf level upward.
    #[serde_as(as = "Vec<PrefixedHex>")]
    pub proof: Vec<[u8; HASH_SIZE]>,
}

impl ClaimProofsFile {
    /// Find the claim entry of `address`, if it is part of this distribution.
    #[must_use]
    pub fn find(&self, address: &Address) -> Option<&ClaimProofEntry> {
        self.claims.iter().find(|entry| entry.address == *address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_json_format() {
        let json = r#"{
          "merkle_root": "0x0dbe58dcdef8457ab435b5ac3e49782c2502b6356c884e1f747a9d8865abf73a",
          "claims": [
            {
              "address": "0x1111111111111111111111111111111111111111",
              "amount": "100",
              "leaf": "0x4f2aefca2998f6aa2ab6799857a78dad717148458baa694d613c74251a29f216",
              "proof": [
                "0x7a10cfda5e9b2c0b4e2b98d253b1f1b38d27b63642bc2dfc72471e863437348f",
                "0xc53ea9f1e3c465f361374ca53be5e8bc7c1d528dd756909bfe418326ca964de7"
              ]
            }
          ]
        }"#;

        let file: ClaimProofsFile = serde_json::from_str(json).expect("Failed to deserialize");
        let entry = file
            .find(&Address::new([0x11; 20]))
            .expect("entry should be present");
        assert_eq!(entry.amount, 100);
        assert_eq!(entry.proof.len(), 2);
        assert!(file.find(&Address::new([0x22; 20])).is_none());
    }
}

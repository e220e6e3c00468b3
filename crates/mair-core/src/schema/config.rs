use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::base::{Amount, HASH_SIZE, PrefixedHex};

/// Public description of a committed distribution.
///
/// This is what the organizer publishes next to the deployed distributor: the Merkle root
/// plus enough metadata to check the vault is funded for the whole list.
#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DistributionConfiguration {
    /// Merkle root committing to every (address, amount) pair.
    #[serde_as(as = "PrefixedHex")]
    #[schemars(with = "String")]
    pub merkle_root: [u8; HASH_SIZE],
    /// Number of recipients in the allocation list.
    pub recipients: u64,
    /// Sum of all allocated amounts, as a decimal string.
    #[serde_as(as = "DisplayFromStr")]
    #[schemars(with = "String")]
    pub total_amount: Amount,
}

impl DistributionConfiguration {
    /// Create a new distribution configuration.
    #[must_use]
    pub const fn new(merkle_root: [u8; HASH_SIZE], recipients: u64, total_amount: Amount) -> Self {
        Self {
            merkle_root,
            recipients,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_json_format() {
        // Documents the expected JSON format for consumers
        let json = r#"{
          "merkle_root": "0x0dbe58dcdef8457ab435b5ac3e49782c2502b6356c884e1f747a9d8865abf73a",
          "recipients": 3,
          "total_amount": "600"
        }"#;

        let config: DistributionConfiguration =
            serde_json::from_str(json).expect("Failed to deserialize JSON");

        assert_eq!(config.recipients, 3);
        assert_eq!(config.total_amount, 600);
        assert_eq!(config.merkle_root.first(), Some(&0x0d));
        assert_eq!(config.merkle_root.last(), Some(&0x3a));
    }
}

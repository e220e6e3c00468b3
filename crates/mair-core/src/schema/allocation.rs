use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::base::{Address, Amount};

/// One row of the distribution list: a recipient and the amount allocated to it.
#[serde_as]
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AllocationEntry {
    /// Recipient address (`0x`-prefixed, 40 hex digits).
    #[schemars(with = "String")]
    pub address: Address,
    /// Allocated amount in the smallest token unit, as a decimal string.
    #[serde_as(as = "DisplayFromStr")]
    #[schemars(with = "String")]
    pub amount: Amount,
}

impl AllocationEntry {
    /// Create a new allocation entry.
    #[must_use]
    pub const fn new(address: Address, amount: Amount) -> Self {
        Self { address, amount }
    }
}

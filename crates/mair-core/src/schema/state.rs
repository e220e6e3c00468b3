use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::base::{Address, Amount, HASH_SIZE, PrefixedHex};

/// Mutable state of a distributor: current root, claim flags and running totals.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributorState {
    /// Root claims are currently verified against.
    #[serde_as(as = "PrefixedHex")]
    pub merkle_root: [u8; HASH_SIZE],
    /// Number of root rotations performed since initialization.
    pub round: u64,
    /// Addresses that already claimed.
    pub claimed: BTreeSet<Address>,
    /// Sum of every successful claim.
    #[serde_as(as = "DisplayFromStr")]
    pub total_claimed: Amount,
}

/// On-disk snapshot of a distributor together with the token balances it moves.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerFile {
    /// Administrator allowed to rotate the root and withdraw.
    pub admin: Address,
    /// Holder of the undistributed tokens.
    pub vault: Address,
    /// Distributor state.
    pub state: DistributorState,
    /// Token balances keyed by holder.
    #[serde_as(as = "BTreeMap<_, DisplayFromStr>")]
    pub balances: BTreeMap<Address, Amount>,
}

//! Token collaborator used by the claim ledger.

use std::collections::BTreeMap;

use mair_core::base::{Address, Amount};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::TransferError;

/// The fungible token ledger a distribution pays out of.
pub trait TokenLedger: Send {
    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// Returns an error and leaves all balances untouched if the transfer cannot happen.
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Current balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;
}

/// Balances kept in memory, serialized as a map of address to decimal amount.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryTokenLedger {
    #[serde_as(as = "BTreeMap<_, DisplayFromStr>")]
    balances: BTreeMap<Address, Amount>,
}

impl InMemoryTokenLedger {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
        }
    }

    /// A ledger with the given starting balances.
    #[must_use]
    pub const fn from_balances(balances: BTreeMap<Address, Amount>) -> Self {
        Self { balances }
    }

    /// Credit `amount` new tokens to `holder`.
    ///
    /// # Errors
    /// Returns [`TransferError::Overflow`] if the balance would overflow.
    pub fn mint(&mut self, holder: &Address, amount: Amount) -> Result<(), TransferError> {
        let balance = self.balance_of(holder);
        let credited = balance
            .checked_add(amount)
            .ok_or(TransferError::Overflow(*holder))?;
        self.balances.insert(*holder, credited);
        Ok(())
    }

    /// Balances by holder. Accounts emptied by a transfer are dropped.
    #[must_use]
    pub const fn balances(&self) -> &BTreeMap<Address, Amount> {
        &self.balances
    }

    /// Consume the ledger, returning its balances.
    #[must_use]
    pub fn into_balances(self) -> BTreeMap<Address, Amount> {
        self.balances
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(from);
        let debited = available
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientFunds {
                holder: *from,
                available,
                requested: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow(*to))?;

        if debited == 0 {
            self.balances.remove(from);
        } else {
            self.balances.insert(*from, debited);
        }
        self.balances.insert(*to, credited);
        Ok(())
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use test_utils::address;

    use super::*;

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = InMemoryTokenLedger::new();
        ledger.mint(&address(0xaa), 500).expect("mint");

        ledger
            .transfer(&address(0xaa), &address(0x11), 200)
            .expect("transfer");
        assert_eq!(ledger.balance_of(&address(0xaa)), 300);
        assert_eq!(ledger.balance_of(&address(0x11)), 200);

        ledger
            .transfer(&address(0xaa), &address(0x11), 300)
            .expect("transfer");
        assert!(!ledger.balances().contains_key(&address(0xaa)));
        assert_eq!(ledger.balance_of(&address(0x11)), 500);
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let mut ledger = InMemoryTokenLedger::from_balances(BTreeMap::from([
            (address(0xaa), 10),
            (address(0x11), Amount::MAX),
        ]));
        let before = ledger.clone();

        assert_eq!(
            ledger.transfer(&address(0xaa), &address(0x22), 11),
            Err(TransferError::InsufficientFunds {
                holder: address(0xaa),
                available: 10,
                requested: 11,
            })
        );
        assert_eq!(
            ledger.transfer(&address(0xaa), &address(0x11), 1),
            Err(TransferError::Overflow(address(0x11)))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn serializes_as_decimal_map() {
        let ledger = InMemoryTokenLedger::from_balances(BTreeMap::from([(address(0xaa), 42)]));
        let json = serde_json::to_string(&ledger).expect("serialize");
        assert_eq!(json, r#"{"0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa":"42"}"#);
        let back: InMemoryTokenLedger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ledger);
    }
}

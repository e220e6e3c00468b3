use mair_core::base::{Address, Amount};
use thiserror::Error;

/// Errors reported by a token ledger when moving tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The sender does not hold enough tokens.
    #[error("Insufficient funds: {holder} holds {available}, {requested} requested")]
    InsufficientFunds {
        /// Sending account.
        holder: Address,
        /// Balance of the sender.
        available: Amount,
        /// Amount that was requested.
        requested: Amount,
    },

    /// The receiver's balance would overflow.
    #[error("Balance of {0} would overflow")]
    Overflow(Address),
}

/// Errors returned by [`ClaimLedger`](crate::ClaimLedger) operations.
///
/// Every variant except [`ClaimError::Transfer`] is raised before any state changes. A
/// transfer failure during a claim rolls the claim flag back before it is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// The address already claimed its allocation.
    #[error("Address {0} already claimed")]
    AlreadyClaimed(Address),

    /// The proof does not commit `(address, amount)` to the current root.
    #[error("Invalid proof for {0}")]
    InvalidProof(Address),

    /// The vault holds less than a withdrawal asks for.
    #[error("Insufficient vault balance: {available} available, {requested} requested")]
    InsufficientBalance {
        /// Vault balance.
        available: Amount,
        /// Requested amount.
        requested: Amount,
    },

    /// The caller is not the administrator.
    #[error("Unauthorized caller {caller}")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// The zero root cannot be committed.
    #[error("Invalid merkle root")]
    InvalidRoot,

    /// Claims and withdrawals must move a positive amount.
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// The token ledger refused the transfer.
    #[error("Token transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// The running claimed total would overflow.
    #[error("Total claimed amount overflows")]
    AmountOverflow,

    /// A thread panicked while holding the ledger lock.
    #[error("Ledger state lock poisoned")]
    StatePoisoned,
}

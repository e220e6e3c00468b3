//! The claim state machine.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use mair_core::base::{Address, Amount};
use mair_core::schema::state::DistributorState;
use mair_merkle::{MerkleNode, MerkleRoot, encode_leaf, verify};
use tracing::{debug, info, instrument, warn};

use crate::{AdminControl, ClaimError, DistributorEvent, EventSink, TokenLedger, TransferError};

/// Fixed parameters of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributorConfig {
    /// Administrator allowed to rotate the root and withdraw.
    pub admin: Address,
    /// Account holding the undistributed tokens.
    pub vault: Address,
    /// Initial committed root.
    pub merkle_root: MerkleRoot,
}

#[derive(Debug)]
struct LedgerState<T> {
    root: MerkleRoot,
    round: u64,
    claimed: BTreeSet<Address>,
    total_claimed: Amount,
    token: T,
}

impl<T: TokenLedger> LedgerState<T> {
    fn check_claim(
        &self,
        vault: &Address,
        address: &Address,
        leaf: &MerkleNode,
        amount: Amount,
        proof: &[MerkleNode],
    ) -> Result<Amount, ClaimError> {
        if self.claimed.contains(address) {
            return Err(ClaimError::AlreadyClaimed(*address));
        }
        if !verify(leaf, proof, &self.root) {
            return Err(ClaimError::InvalidProof(*address));
        }
        let available = self.token.balance_of(vault);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                holder: *vault,
                available,
                requested: amount,
            }
            .into());
        }
        self.total_claimed
            .checked_add(amount)
            .ok_or(ClaimError::AmountOverflow)
    }
}

/// Holds the committed root and claim flags of one distribution and pays claims out of the
/// vault.
///
/// All mutable state sits behind one lock, so the claimed-check, the flag update and the
/// transfer of a claim form a single step with respect to other claims and rotations.
/// Events are emitted after the lock is released, so an [`EventSink`] may query the ledger.
pub struct ClaimLedger<T> {
    admin: AdminControl,
    vault: Address,
    state: Mutex<LedgerState<T>>,
    sink: Box<dyn EventSink>,
}

impl<T: TokenLedger> ClaimLedger<T> {
    /// Start a fresh distribution with no claims.
    ///
    /// # Errors
    /// Returns [`ClaimError::InvalidRoot`] if the configured root is zero.
    pub fn new(
        config: DistributorConfig,
        token: T,
        sink: impl EventSink + 'static,
    ) -> Result<Self, ClaimError> {
        let state = DistributorState {
            merkle_root: config.merkle_root.to_bytes(),
            ..DistributorState::default()
        };
        Self::restore(config, state, token, sink)
    }

    /// Resume a distribution from a snapshot.
    ///
    /// Admin and vault come from `config`; the root, round and claims come from `state`.
    ///
    /// # Errors
    /// Returns [`ClaimError::InvalidRoot`] if the snapshot root is zero.
    pub fn restore(
        config: DistributorConfig,
        state: DistributorState,
        token: T,
        sink: impl EventSink + 'static,
    ) -> Result<Self, ClaimError> {
        let root = MerkleRoot::new(state.merkle_root);
        if root.is_zero() {
            return Err(ClaimError::InvalidRoot);
        }
        Ok(Self {
            admin: AdminControl::new(config.admin),
            vault: config.vault,
            state: Mutex::new(LedgerState {
                root,
                round: state.round,
                claimed: state.claimed,
                total_claimed: state.total_claimed,
                token,
            }),
            sink: Box::new(sink),
        })
    }

    /// Claim `amount` for `address`, proving membership with `proof`.
    ///
    /// # Errors
    /// Returns an error if the amount is zero, the address already claimed, the proof does
    /// not verify against the current root, or the vault cannot pay. Nothing changes on error.
    #[instrument(skip_all, fields(address = %address, amount = %amount))]
    pub fn claim(
        &self,
        address: &Address,
        amount: Amount,
        proof: &[MerkleNode],
    ) -> Result<(), ClaimError> {
        if amount == 0 {
            return Err(ClaimError::ZeroAmount);
        }
        let leaf = encode_leaf(address, amount);

        let mut state = self.lock()?;
        let total_claimed = state.check_claim(&self.vault, address, &leaf, amount, proof)?;

        state.claimed.insert(*address);
        if let Err(err) = state.token.transfer(&self.vault, address, amount) {
            state.claimed.remove(address);
            warn!(%err, "Transfer failed, claim rolled back");
            return Err(err.into());
        }
        state.total_claimed = total_claimed;
        let round = state.round;
        drop(state);

        self.sink.emit(&DistributorEvent::Claimed {
            address: *address,
            amount,
        });
        info!(round, "Claim accepted");
        Ok(())
    }

    /// Dry-run of [`claim`](Self::claim): the error the claim would fail with right now.
    ///
    /// # Errors
    /// The same errors as [`claim`](Self::claim).
    pub fn check_claim(
        &self,
        address: &Address,
        amount: Amount,
        proof: &[MerkleNode],
    ) -> Result<(), ClaimError> {
        if amount == 0 {
            return Err(ClaimError::ZeroAmount);
        }
        let leaf = encode_leaf(address, amount);
        self.lock()?
            .check_claim(&self.vault, address, &leaf, amount, proof)
            .map(|_| ())
    }

    /// Replace the committed root. Claim flags are kept.
    ///
    /// # Errors
    /// Returns an error if `caller` is not the administrator or `new_root` is zero.
    #[instrument(skip_all, fields(caller = %caller, root = %new_root))]
    pub fn rotate_root(&self, caller: &Address, new_root: MerkleRoot) -> Result<(), ClaimError> {
        self.admin.require_admin(caller)?;
        if new_root.is_zero() {
            return Err(ClaimError::InvalidRoot);
        }

        let mut state = self.lock()?;
        let previous = state.root;
        state.root = new_root;
        state.round = state.round.saturating_add(1);
        let round = state.round;
        drop(state);

        self.sink.emit(&DistributorEvent::RootUpdated {
            previous,
            root: new_root,
            round,
        });
        info!(round, "Merkle root rotated");
        Ok(())
    }

    /// Send `amount` from the vault to the administrator.
    ///
    /// # Errors
    /// Returns an error if `caller` is not the administrator, `amount` is zero or larger than
    /// the vault balance, or the token ledger refuses the transfer.
    #[instrument(skip_all, fields(caller = %caller, amount = %amount))]
    pub fn withdraw(&self, caller: &Address, amount: Amount) -> Result<(), ClaimError> {
        self.admin.require_admin(caller)?;
        self.withdraw_locked(self.lock()?, amount)
    }

    /// Send the whole vault balance to the administrator, returning the amount moved.
    ///
    /// # Errors
    /// Returns an error if `caller` is not the administrator or the vault is empty.
    #[instrument(skip_all, fields(caller = %caller))]
    pub fn withdraw_all(&self, caller: &Address) -> Result<Amount, ClaimError> {
        self.admin.require_admin(caller)?;
        let state = self.lock()?;
        let amount = state.token.balance_of(&self.vault);
        self.withdraw_locked(state, amount).map(|()| amount)
    }

    /// Withdraw under `state`, releasing it before the event is emitted.
    fn withdraw_locked(
        &self,
        mut state: MutexGuard<'_, LedgerState<T>>,
        amount: Amount,
    ) -> Result<(), ClaimError> {
        if amount == 0 {
            return Err(ClaimError::ZeroAmount);
        }
        let available = state.token.balance_of(&self.vault);
        if available < amount {
            return Err(ClaimError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        let to = self.admin.admin();
        state.token.transfer(&self.vault, &to, amount)?;
        drop(state);

        self.sink.emit(&DistributorEvent::Withdrawn { to, amount });
        debug!(remaining = %available.saturating_sub(amount), "Vault withdrawal complete");
        Ok(())
    }

    /// Root claims are verified against.
    ///
    /// # Errors
    /// Returns [`ClaimError::StatePoisoned`] if the state lock is poisoned, as do the other
    /// queries.
    pub fn current_root(&self) -> Result<MerkleRoot, ClaimError> {
        Ok(self.lock()?.root)
    }

    /// Number of rotations since the distribution started.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn round(&self) -> Result<u64, ClaimError> {
        Ok(self.lock()?.round)
    }

    /// Whether `address` has claimed.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn is_claimed(&self, address: &Address) -> Result<bool, ClaimError> {
        Ok(self.lock()?.claimed.contains(address))
    }

    /// Number of addresses that have claimed.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn claimed_count(&self) -> Result<usize, ClaimError> {
        Ok(self.lock()?.claimed.len())
    }

    /// Sum of all successful claims.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn total_claimed(&self) -> Result<Amount, ClaimError> {
        Ok(self.lock()?.total_claimed)
    }

    /// Tokens left in the vault.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn vault_balance(&self) -> Result<Amount, ClaimError> {
        Ok(self.lock()?.token.balance_of(&self.vault))
    }

    /// Balance of any account on the token ledger.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn balance_of(&self, holder: &Address) -> Result<Amount, ClaimError> {
        Ok(self.lock()?.token.balance_of(holder))
    }

    /// The administrator.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin.admin()
    }

    /// The vault account.
    #[must_use]
    pub const fn vault(&self) -> Address {
        self.vault
    }

    /// Serializable copy of the claim state.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn snapshot(&self) -> Result<DistributorState, ClaimError> {
        let state = self.lock()?;
        Ok(DistributorState {
            merkle_root: state.root.to_bytes(),
            round: state.round,
            claimed: state.claimed.clone(),
            total_claimed: state.total_claimed,
        })
    }

    /// Consume the ledger, returning its final state and the token collaborator.
    #[allow(clippy::missing_errors_doc, reason = "Documented on `current_root`")]
    pub fn into_parts(self) -> Result<(DistributorState, T), ClaimError> {
        let state = self
            .state
            .into_inner()
            .map_err(|_| ClaimError::StatePoisoned)?;
        Ok((
            DistributorState {
                merkle_root: state.root.to_bytes(),
                round: state.round,
                claimed: state.claimed,
                total_claimed: state.total_claimed,
            },
            state.token,
        ))
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState<T>>, ClaimError> {
        self.state.lock().map_err(|_| ClaimError::StatePoisoned)
    }
}

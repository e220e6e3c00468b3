//! Distributor events and the sinks that receive them.

use std::sync::{Arc, Mutex, PoisonError};

use mair_core::base::{Address, Amount};
use mair_merkle::MerkleRoot;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing::info;

/// Something observable happened to a distribution.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DistributorEvent {
    /// A recipient claimed its allocation.
    Claimed {
        /// Recipient.
        address: Address,
        /// Claimed amount.
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
    },
    /// The administrator replaced the committed root.
    RootUpdated {
        /// Root before the rotation.
        previous: MerkleRoot,
        /// Root after the rotation.
        root: MerkleRoot,
        /// Round started by the rotation.
        round: u64,
    },
    /// The administrator recovered tokens from the vault.
    Withdrawn {
        /// Receiving account (the administrator).
        to: Address,
        /// Withdrawn amount.
        #[serde_as(as = "DisplayFromStr")]
        amount: Amount,
    },
}

/// Receiver of distributor events.
///
/// Events are delivered after the ledger lock is released, once the change they describe
/// is visible to queries. A sink may call back into the ledger. Events of operations racing
/// on different threads can reach the sink in either order.
pub trait EventSink: Send + Sync {
    /// Handle one event.
    fn emit(&self, event: &DistributorEvent);
}

impl<F> EventSink for F
where
    F: Fn(&DistributorEvent) + Send + Sync,
{
    fn emit(&self, event: &DistributorEvent) {
        self(event);
    }
}

/// Logs every event at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &DistributorEvent) {
        match event {
            DistributorEvent::Claimed { address, amount } => {
                info!(address = %address, amount = %amount, "Claimed");
            }
            DistributorEvent::RootUpdated {
                previous,
                root,
                round,
            } => {
                info!(previous = %previous, root = %root, round, "Merkle root updated");
            }
            DistributorEvent::Withdrawn { to, amount } => {
                info!(to = %to, amount = %amount, "Withdrawn");
            }
        }
    }
}

/// Collects events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<DistributorEvent>>>,
}

impl RecordingSink {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<DistributorEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<DistributorEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &DistributorEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

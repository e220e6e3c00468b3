//! Claim ledger for Merkle airdrop distributions.
//!
//! [`ClaimLedger`] holds the committed root and the claim flags, verifies claims against the
//! root and moves tokens out of the vault through a [`TokenLedger`]. Root rotation and
//! withdrawal are gated by [`AdminControl`].

mod admin;
mod distributor;
mod error;
mod event;
mod token;

pub use admin::AdminControl;
pub use distributor::{ClaimLedger, DistributorConfig};
pub use error::{ClaimError, TransferError};
pub use event::{DistributorEvent, EventSink, RecordingSink, TracingSink};
pub use token::{InMemoryTokenLedger, TokenLedger};

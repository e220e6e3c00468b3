use std::path::PathBuf;

use mair_core::base::{Address, Amount};
use mair_merkle::MerkleRoot;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use tracing::instrument;

use super::ledger_store::load_ledger;

/// Read-only summary of a ledger.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStatus {
    /// Root claims are verified against.
    pub merkle_root: MerkleRoot,
    /// Number of root rotations so far.
    pub round: u64,
    /// Administrator address.
    pub admin: Address,
    /// Vault address.
    pub vault: Address,
    /// Number of addresses that claimed.
    pub claimed_count: usize,
    /// Sum of all claims.
    #[serde_as(as = "DisplayFromStr")]
    pub total_claimed: Amount,
    /// Tokens left in the vault.
    #[serde_as(as = "DisplayFromStr")]
    pub vault_balance: Amount,
    /// Address asked about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Whether `address` has claimed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed: Option<bool>,
}

/// Summarize a ledger, optionally reporting whether `address` has claimed.
///
/// # Errors
/// Returns an error if the ledger file cannot be loaded.
#[instrument(skip_all, fields(ledger = %ledger_file.display()))]
pub async fn ledger_status(
    ledger_file: PathBuf,
    address: Option<Address>,
) -> eyre::Result<LedgerStatus> {
    let loaded = load_ledger(&ledger_file).await?;
    let ledger = &loaded.ledger;
    let claimed = address
        .map(|address| ledger.is_claimed(&address))
        .transpose()?;

    Ok(LedgerStatus {
        merkle_root: ledger.current_root()?,
        round: ledger.round()?,
        admin: ledger.admin(),
        vault: ledger.vault(),
        claimed_count: ledger.claimed_count()?,
        total_claimed: ledger.total_claimed()?,
        vault_balance: ledger.vault_balance()?,
        address,
        claimed,
    })
}

/// Print the [`ledger_status`] summary as JSON.
///
/// # Errors
/// Returns an error if the ledger file cannot be loaded.
#[allow(clippy::print_stdout, reason = "Prints status to stdout")]
pub async fn print_status(ledger_file: PathBuf, address: Option<Address>) -> eyre::Result<()> {
    let status = ledger_status(ledger_file, address).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

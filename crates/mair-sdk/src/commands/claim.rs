use std::path::PathBuf;

use eyre::ContextCompat as _;
use mair_core::base::{Address, Amount};
use mair_core::schema::proofs::ClaimProofsFile;
use mair_merkle::MerkleProof;
use tracing::{info, instrument};

use super::files::read_json;
use super::ledger_store::{load_ledger, persist_ledger};

/// Claim the allocation of `address` using its entry in a proofs file.
///
/// `amount` overrides the amount listed in the proofs file; the claim only succeeds if the
/// pair is still committed to by the ledger's current root.
///
/// # Errors
/// Returns an error if the address has no entry in the proofs file, the ledger rejects the
/// claim, or a file operation fails.
#[instrument(skip_all, fields(address = %address))]
pub async fn claim(
    ledger_file: PathBuf,
    journal_file: PathBuf,
    proofs_file: PathBuf,
    address: Address,
    amount: Option<Amount>,
) -> eyre::Result<()> {
    let proofs: ClaimProofsFile = read_json(&proofs_file).await?;
    let entry = proofs.find(&address).with_context(|| {
        format!(
            "No claim for {address} in proofs file {}",
            proofs_file.display()
        )
    })?;
    let amount = amount.unwrap_or(entry.amount);
    let proof = MerkleProof::from(entry.proof.as_slice());

    let loaded = load_ledger(&ledger_file).await?;
    loaded.ledger.claim(&address, amount, proof.siblings())?;
    persist_ledger(&ledger_file, &journal_file, loaded).await?;

    info!(amount = %amount, "Claim recorded");
    Ok(())
}

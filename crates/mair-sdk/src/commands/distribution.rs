//! Building a distribution from an allocation list and checking proofs files.

use std::path::PathBuf;

use eyre::{Context as _, ensure};
use mair_core::schema::config::DistributionConfiguration;
use mair_core::schema::proofs::ClaimProofsFile;
use mair_merkle::{MerkleProof, MerkleRoot, MerkleTree, encode_leaf, verify};
use tracing::{info, instrument, warn};

use super::allocation_input::read_allocation;
use super::files::{read_json, write_json};

/// Build the Merkle tree over an allocation list and export the distribution configuration
/// and the per-recipient claim proofs.
///
/// # Errors
/// Returns an error if the allocation list is invalid or writing files fails.
#[instrument(skip_all, fields(allocation = %allocation_file.display()))]
pub async fn build_distribution(
    allocation_file: PathBuf,
    configuration_output_file: PathBuf,
    proofs_output_file: PathBuf,
) -> eyre::Result<()> {
    let entries = read_allocation(&allocation_file).await?;
    info!(recipients = entries.len(), "Loaded allocation list");

    let tree = tokio::task::spawn_blocking(move || MerkleTree::build(entries))
        .await?
        .context("Failed to build merkle tree")?;
    let recipients = u64::try_from(tree.len()).context("Recipient count does not fit into u64")?;

    let config =
        DistributionConfiguration::new(tree.root().to_bytes(), recipients, tree.total_amount());
    write_json(&configuration_output_file, &config).await?;
    info!(
        file = ?configuration_output_file,
        root = %tree.root(),
        total_amount = %tree.total_amount(),
        "Exported distribution configuration"
    );

    write_json(&proofs_output_file, &tree.claim_proofs()).await?;
    info!(file = ?proofs_output_file, depth = tree.depth(), "Exported claim proofs");
    Ok(())
}

/// Verify every claim of a proofs file against its root, or against `expected_root` when
/// given.
///
/// # Errors
/// Returns an error if the file cannot be loaded or any claim fails to verify.
#[instrument(skip_all, fields(proofs = %proofs_file.display()))]
pub async fn verify_proofs(
    proofs_file: PathBuf,
    expected_root: Option<MerkleRoot>,
) -> eyre::Result<()> {
    let proofs: ClaimProofsFile = read_json(&proofs_file).await?;
    let file_root = MerkleRoot::new(proofs.merkle_root);
    if expected_root.is_some_and(|root| root != file_root) {
        warn!(file_root = %file_root, "Proofs file was generated for a different root");
    }
    let root = expected_root.unwrap_or(file_root);

    info!(claims = proofs.claims.len(), root = %root, "Proofs loaded, starting verification...");

    let (valid_count, invalid_count, total) = tokio::task::spawn_blocking(move || {
        let mut valid_count = 0_usize;
        let mut invalid_count = 0_usize;

        for (index, claim) in proofs.claims.iter().enumerate() {
            let leaf = encode_leaf(&claim.address, claim.amount);
            let proof = MerkleProof::from(claim.proof.as_slice());
            if leaf.to_bytes() == claim.leaf && verify(&leaf, proof.siblings(), &root) {
                valid_count = valid_count.saturating_add(1);
            } else {
                warn!(
                    index,
                    address = %claim.address,
                    amount = %claim.amount,
                    "Proof INVALID"
                );
                invalid_count = invalid_count.saturating_add(1);
            }
        }

        (valid_count, invalid_count, proofs.claims.len())
    })
    .await?;

    info!(
        valid = valid_count,
        invalid = invalid_count,
        total = total,
        "Verification complete"
    );
    ensure!(
        invalid_count == 0,
        "{invalid_count} of {total} claim proofs failed verification"
    );
    Ok(())
}

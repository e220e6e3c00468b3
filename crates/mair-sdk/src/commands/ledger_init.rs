use std::path::PathBuf;

use eyre::ensure;
use mair_core::base::{Address, Amount};
use mair_core::schema::config::DistributionConfiguration;
use mair_core::schema::state::LedgerFile;
use mair_ledger::{ClaimLedger, DistributorConfig, InMemoryTokenLedger, TracingSink};
use mair_merkle::MerkleRoot;
use tracing::{info, instrument, warn};

use super::files::{read_json, write_json};
use super::ledger_store::lock_ledger;

/// Create a ledger state file for a distribution, funding the vault with `deposit`.
///
/// # Errors
/// Returns an error if the deposit is zero, the ledger file already exists, or the
/// configuration cannot be loaded or commits to the zero root.
#[instrument(skip_all, fields(admin = %admin, vault = %vault, deposit = %deposit))]
pub async fn init_ledger(
    configuration_file: PathBuf,
    ledger_output_file: PathBuf,
    admin: Address,
    vault: Address,
    deposit: Amount,
) -> eyre::Result<()> {
    ensure!(deposit > 0, "Initial deposit must be greater than zero");
    let _lock = lock_ledger(&ledger_output_file).await?;
    ensure!(
        !tokio::fs::try_exists(&ledger_output_file).await?,
        "Ledger file {} already exists",
        ledger_output_file.display()
    );

    let config: DistributionConfiguration = read_json(&configuration_file).await?;
    if deposit < config.total_amount {
        warn!(
            total_amount = %config.total_amount,
            "Deposit does not cover the full allocation"
        );
    }

    let mut token = InMemoryTokenLedger::new();
    token.mint(&vault, deposit)?;
    let merkle_root = MerkleRoot::new(config.merkle_root);
    let ledger = ClaimLedger::new(
        DistributorConfig {
            admin,
            vault,
            merkle_root,
        },
        token,
        TracingSink,
    )?;
    let (state, token) = ledger.into_parts()?;

    write_json(
        &ledger_output_file,
        &LedgerFile {
            admin,
            vault,
            state,
            balances: token.into_balances(),
        },
    )
    .await?;

    info!(file = ?ledger_output_file, root = %merkle_root, "Initialized ledger");
    Ok(())
}

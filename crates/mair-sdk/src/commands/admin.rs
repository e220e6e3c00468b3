//! Administrator commands: root rotation and vault withdrawal.

use std::path::PathBuf;

use mair_core::base::{Address, Amount};
use mair_core::schema::config::DistributionConfiguration;
use mair_merkle::MerkleRoot;
use tracing::{info, instrument};

use super::files::read_json;
use super::ledger_store::{load_ledger, persist_ledger};

/// Where the new root of a rotation comes from.
#[derive(Debug, Clone)]
pub enum RootSource {
    /// A root given directly.
    Explicit(MerkleRoot),
    /// The root of a distribution configuration file.
    Configuration(PathBuf),
}

impl RootSource {
    async fn resolve(self) -> eyre::Result<MerkleRoot> {
        match self {
            Self::Explicit(root) => Ok(root),
            Self::Configuration(path) => {
                let config: DistributionConfiguration = read_json(&path).await?;
                Ok(MerkleRoot::new(config.merkle_root))
            }
        }
    }
}

/// Rotate the committed root of a ledger. Existing claims stay claimed.
///
/// # Errors
/// Returns an error if `caller` is not the administrator, the root is zero, or a file
/// operation fails.
#[instrument(skip_all, fields(caller = %caller))]
pub async fn rotate_root(
    ledger_file: PathBuf,
    journal_file: PathBuf,
    caller: Address,
    source: RootSource,
) -> eyre::Result<()> {
    let root = source.resolve().await?;

    let loaded = load_ledger(&ledger_file).await?;
    loaded.ledger.rotate_root(&caller, root)?;
    let round = loaded.ledger.round()?;
    persist_ledger(&ledger_file, &journal_file, loaded).await?;

    info!(root = %root, round, "Root rotation recorded");
    Ok(())
}

/// Withdraw `amount` from the vault to the administrator, or the whole vault balance when
/// `amount` is `None`.
///
/// # Errors
/// Returns an error if `caller` is not the administrator, the vault holds too little, or a
/// file operation fails.
#[instrument(skip_all, fields(caller = %caller))]
pub async fn withdraw(
    ledger_file: PathBuf,
    journal_file: PathBuf,
    caller: Address,
    amount: Option<Amount>,
) -> eyre::Result<()> {
    let loaded = load_ledger(&ledger_file).await?;
    let withdrawn = match amount {
        Some(amount) => {
            loaded.ledger.withdraw(&caller, amount)?;
            amount
        }
        None => loaded.ledger.withdraw_all(&caller)?,
    };
    persist_ledger(&ledger_file, &journal_file, loaded).await?;

    info!(amount = %withdrawn, "Withdrawal recorded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use mair_core::base::HASH_SIZE;
    use mair_core::schema::state::LedgerFile;
    use mair_ledger::{ClaimError, DistributorEvent};
    use test_utils::{address, allocation};

    use super::*;
    use crate::commands::test_support::{ADMIN, VAULT, Workspace};
    use crate::commands::{build_distribution, claim, read_journal};

    #[tokio::test]
    async fn rotation_from_configuration_keeps_claims() {
        let ws = Workspace::new();
        ws.init(10_000).await;
        claim(
            ws.ledger.clone(),
            ws.journal.clone(),
            ws.proofs.clone(),
            address(0x11),
            None,
        )
        .await
        .expect("claim");

        // Second round: 0x22 gets more, 0x44 is added
        let next_allocation = ws.dir.path().join("allocation-2.json");
        let next_config = ws.dir.path().join("config-2.json");
        let next_proofs = ws.dir.path().join("proofs-2.json");
        tokio::fs::write(
            &next_allocation,
            serde_json::to_string(&allocation![(0x11, 100), (0x22, 250), (0x44, 400)])
                .expect("serialize"),
        )
        .await
        .expect("write allocation");
        build_distribution(next_allocation, next_config.clone(), next_proofs.clone())
            .await
            .expect("second build");

        let err = rotate_root(
            ws.ledger.clone(),
            ws.journal.clone(),
            address(0x22),
            RootSource::Configuration(next_config.clone()),
        )
        .await
        .expect_err("non-admin rotation");
        assert_eq!(
            err.downcast_ref::<ClaimError>(),
            Some(&ClaimError::Unauthorized {
                caller: address(0x22)
            })
        );

        rotate_root(
            ws.ledger.clone(),
            ws.journal.clone(),
            ADMIN,
            RootSource::Configuration(next_config),
        )
        .await
        .expect("admin rotation");

        // Old proofs no longer match, new ones do; 0x11 stays claimed
        assert!(
            claim(
                ws.ledger.clone(),
                ws.journal.clone(),
                ws.proofs.clone(),
                address(0x22),
                None
            )
            .await
            .is_err()
        );
        claim(
            ws.ledger.clone(),
            ws.journal.clone(),
            next_proofs.clone(),
            address(0x22),
            None,
        )
        .await
        .expect("claim against new root");
        let err = claim(
            ws.ledger.clone(),
            ws.journal.clone(),
            next_proofs,
            address(0x11),
            None,
        )
        .await
        .expect_err("already claimed");
        assert_eq!(
            err.downcast_ref::<ClaimError>(),
            Some(&ClaimError::AlreadyClaimed(address(0x11)))
        );

        let file: LedgerFile = read_json(&ws.ledger).await.expect("ledger");
        assert_eq!(file.state.round, 1);
        assert_eq!(file.state.total_claimed, 350);

        let events = read_journal(&ws.journal).await.expect("journal");
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events.get(1),
            Some(DistributorEvent::RootUpdated { round: 1, .. })
        ));
    }

    #[tokio::test]
    async fn explicit_zero_root_is_rejected() {
        let ws = Workspace::new();
        ws.init(600).await;

        let err = rotate_root(
            ws.ledger.clone(),
            ws.journal.clone(),
            ADMIN,
            RootSource::Explicit(MerkleRoot::new([0_u8; HASH_SIZE])),
        )
        .await
        .expect_err("zero root");
        assert_eq!(err.downcast_ref::<ClaimError>(), Some(&ClaimError::InvalidRoot));
    }

    #[tokio::test]
    async fn withdraw_amount_then_remainder() {
        let ws = Workspace::new();
        ws.init(600).await;

        let err = withdraw(ws.ledger.clone(), ws.journal.clone(), ADMIN, Some(601))
            .await
            .expect_err("too much");
        assert_eq!(
            err.downcast_ref::<ClaimError>(),
            Some(&ClaimError::InsufficientBalance {
                available: 600,
                requested: 601
            })
        );

        withdraw(ws.ledger.clone(), ws.journal.clone(), ADMIN, Some(100))
            .await
            .expect("partial withdrawal");
        withdraw(ws.ledger.clone(), ws.journal.clone(), ADMIN, None)
            .await
            .expect("withdraw remainder");

        let file: LedgerFile = read_json(&ws.ledger).await.expect("ledger");
        assert_eq!(file.balances.get(&ADMIN), Some(&600));
        assert_eq!(file.balances.get(&VAULT), None);
        assert_eq!(
            read_journal(&ws.journal).await.expect("journal"),
            vec![
                DistributorEvent::Withdrawn {
                    to: ADMIN,
                    amount: 100
                },
                DistributorEvent::Withdrawn {
                    to: ADMIN,
                    amount: 500
                },
            ]
        );
    }
}

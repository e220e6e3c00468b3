//! Temporary workspaces for command tests.

use std::path::PathBuf;

use mair_core::base::Address;
use tempfile::TempDir;
use test_utils::{address, sample_allocation};

pub(super) const ADMIN: Address = address(0xad);
pub(super) const VAULT: Address = address(0xee);

/// A temp directory holding the files of one distribution, seeded with the sample
/// three-recipient allocation.
pub(super) struct Workspace {
    pub(super) dir: TempDir,
    pub(super) allocation: PathBuf,
    pub(super) config: PathBuf,
    pub(super) proofs: PathBuf,
    pub(super) ledger: PathBuf,
    pub(super) journal: PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let allocation = dir.path().join("allocation.json");
        std::fs::write(
            &allocation,
            serde_json::to_string_pretty(&sample_allocation()).expect("serialize allocation"),
        )
        .expect("write allocation");

        Self {
            config: dir.path().join("config.json"),
            proofs: dir.path().join("proofs.json"),
            ledger: dir.path().join("ledger.json"),
            journal: dir.path().join("events.jsonl"),
            allocation,
            dir,
        }
    }

    pub(super) async fn build(&self) {
        super::build_distribution(
            self.allocation.clone(),
            self.config.clone(),
            self.proofs.clone(),
        )
        .await
        .expect("distribution should build");
    }

    pub(super) async fn init(&self, deposit: u128) {
        self.build().await;
        super::init_ledger(self.config.clone(), self.ledger.clone(), ADMIN, VAULT, deposit)
            .await
            .expect("ledger should initialize");
    }
}

//! Drives the `mair` binary through a full distribution: building the tree, funding a ledger,
//! claiming, and the administrator operations.

#![allow(
    clippy::indexing_slicing,
    reason = "Test code should panic on invalid data"
)]

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use mair_core::schema::config::DistributionConfiguration;
use mair_ledger::DistributorEvent;
use serde_json::Value;
use tempfile::tempdir;
use test_utils::address;

fn mair(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("mair");
    cmd.current_dir(dir).env("RUST_LOG", "warn");
    cmd
}

fn status(dir: &Path, extra: &[&str]) -> Value {
    let output = mair(dir)
        .args(["status", "--ledger", "ledger.json"])
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("status output should be JSON")
}

#[test]
fn distribution_claim_and_admin_workflow() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let dir = temp_dir.path();
    let admin = address(0xad).to_string();
    let vault = address(0xee).to_string();
    let (first, second, third) = (
        address(0x11).to_string(),
        address(0x22).to_string(),
        address(0x33).to_string(),
    );

    std::fs::write(
        dir.join("allocation.csv"),
        format!("address,amount\n# round one\n{first},100\n{second},200\n{third},300\n"),
    )
    .expect("write allocation");

    mair(dir)
        .args([
            "tree",
            "build",
            "--allocation",
            "allocation.csv",
            "--config-out",
            "distribution.json",
            "--proofs-out",
            "claim-proofs.json",
        ])
        .assert()
        .success();

    let config: DistributionConfiguration = serde_json::from_str(
        &std::fs::read_to_string(dir.join("distribution.json")).expect("read configuration"),
    )
    .expect("parse configuration");
    assert_eq!(config.recipients, 3);
    assert_eq!(config.total_amount, 600);

    mair(dir)
        .args(["tree", "verify", "--proofs", "claim-proofs.json"])
        .assert()
        .success();
    let other_root = format!("0x{}", "ab".repeat(32));
    mair(dir)
        .args([
            "tree",
            "verify",
            "--proofs",
            "claim-proofs.json",
            "--root",
            &other_root,
        ])
        .assert()
        .failure();

    mair(dir)
        .args([
            "ledger",
            "init",
            "--config",
            "distribution.json",
            "--ledger",
            "ledger.json",
            "--admin",
            &admin,
            "--vault",
            &vault,
            "--deposit",
            "600",
        ])
        .assert()
        .success();

    let claim = |who: &str, extra: &[&str]| {
        let mut cmd = mair(dir);
        cmd.args([
            "claim",
            "--ledger",
            "ledger.json",
            "--journal",
            "ledger-events.jsonl",
            "--proofs",
            "claim-proofs.json",
            "--address",
            who,
        ])
        .args(extra);
        cmd
    };
    claim(&second, &[]).assert().success();
    claim(&second, &[]).assert().failure();
    claim(&third, &["--amount", "999"]).assert().failure();

    let summary = status(dir, &["--address", &second]);
    assert_eq!(summary["claimed"], Value::Bool(true));
    assert_eq!(summary["claimed_count"], 1);
    assert_eq!(summary["total_claimed"], "200");
    assert_eq!(summary["vault_balance"], "400");
    let summary = status(dir, &["--address", &first]);
    assert_eq!(summary["claimed"], Value::Bool(false));

    let admin_cmd = |args: &[&str]| {
        let mut cmd = mair(dir);
        cmd.args(["admin"])
            .args(args)
            .args(["--ledger", "ledger.json", "--journal", "ledger-events.jsonl"]);
        cmd
    };
    admin_cmd(&["withdraw", "--caller", &second]).assert().failure();
    admin_cmd(&["withdraw", "--caller", &admin, "--amount", "100"])
        .assert()
        .success();
    admin_cmd(&["rotate-root", "--caller", &admin, "--root", &other_root])
        .assert()
        .success();

    let summary = status(dir, &[]);
    assert_eq!(summary["round"], 1);
    assert_eq!(summary["merkle_root"], other_root.as_str());
    assert_eq!(summary["vault_balance"], "300");
    assert!(summary.get("claimed").is_none());

    // Old proofs no longer match the rotated root
    claim(&first, &[]).assert().failure();

    let journal = std::fs::read_to_string(dir.join("ledger-events.jsonl")).expect("read journal");
    let events: Vec<DistributorEvent> = journal
        .lines()
        .map(|line| serde_json::from_str(line).expect("journal line"))
        .collect();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events.first(),
        Some(&DistributorEvent::Claimed {
            address: address(0x22),
            amount: 200
        })
    );
    assert_eq!(
        events.get(1),
        Some(&DistributorEvent::Withdrawn {
            to: address(0xad),
            amount: 100
        })
    );
    assert!(matches!(
        events.get(2),
        Some(DistributorEvent::RootUpdated { round: 1, .. })
    ));
}

#[test]
fn ledger_init_refuses_to_overwrite() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let dir = temp_dir.path();
    std::fs::write(
        dir.join("allocation.json"),
        format!(r#"[{{"address":"{}","amount":"50"}}]"#, address(0x11)),
    )
    .expect("write allocation");

    mair(dir).args(["tree", "build"]).assert().success();
    let init = || {
        let mut cmd = mair(dir);
        cmd.args(["ledger", "init", "--deposit", "50"])
            .env("MAIR_ADMIN", address(0xad).to_string())
            .env("MAIR_VAULT", address(0xee).to_string());
        cmd
    };
    init().assert().success();
    init().assert().failure();
}

#[test]
fn schema_is_printed() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output = mair(temp_dir.path())
        .args(["tree", "schema"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf-8 output");
    assert!(stdout.contains("Allocation List JSON Schema"));
}

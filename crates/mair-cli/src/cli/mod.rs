//! Command-line interface for the `mair` CLI application.

mod admin;
mod claim;
pub mod constants;
mod ledger;
mod status;
mod tree;

use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, eyre};
use mair_core::base::{Address, Amount};
use mair_merkle::MerkleRoot;

pub use self::admin::AdminCommands;
pub use self::claim::ClaimArgs;
use self::constants::{
    DEFAULT_JOURNAL_FILE, DEFAULT_LEDGER_FILE, MAIR_JOURNAL_FILE, MAIR_LEDGER_FILE,
};
pub use self::ledger::LedgerCommands;
pub use self::status::StatusArgs;
pub use self::tree::TreeCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "mair")]
#[command(about = "Merkle airdrop tools")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Allocation tree utilities (organizer focused).
    Tree {
        /// Tree subcommands.
        #[command(subcommand)]
        command: TreeCommands,
    },
    /// Ledger state management.
    Ledger {
        /// Ledger subcommands.
        #[command(subcommand)]
        command: LedgerCommands,
    },
    /// Claim an allocation.
    Claim {
        #[command(flatten)]
        args: ClaimArgs,
    },
    /// Administrator operations.
    Admin {
        /// Admin subcommands.
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Show the state of a ledger.
    Status {
        #[command(flatten)]
        args: StatusArgs,
    },
}

/// Ledger state and event journal locations.
#[derive(Debug, clap::Args)]
pub struct LedgerFileArgs {
    /// Ledger state file.
    #[arg(long, env = MAIR_LEDGER_FILE, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
    /// Event journal (JSON lines), appended to on every state change.
    #[arg(long, env = MAIR_JOURNAL_FILE, default_value = DEFAULT_JOURNAL_FILE)]
    pub journal: PathBuf,
}

pub fn parse_address(s: &str) -> Result<Address> {
    s.parse().map_err(|e| eyre!("Invalid address: {s}. {e}"))
}

pub fn parse_amount(s: &str) -> Result<Amount> {
    let amount: Amount = s
        .trim()
        .parse()
        .map_err(|e| eyre!("Invalid amount: {s}. {e}"))?;
    if amount == 0 {
        return Err(eyre!("Invalid amount: {s}. Expected a positive integer."));
    }
    Ok(amount)
}

pub fn parse_root(s: &str) -> Result<MerkleRoot> {
    s.parse().map_err(|e| eyre!("Invalid merkle root: {s}. {e}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[test]
    fn address_parse() {
        let address =
            parse_address("0x1111111111111111111111111111111111111111").expect("valid address");
        assert_eq!(address, Address::new([0x11; 20]));
        assert!(parse_address("0x11").is_err());
        assert!(parse_address("0x0000000000000000000000000000000000000000").is_err());
    }

    #[test]
    fn amount_parse() {
        assert_eq!(parse_amount("1000").expect("valid amount"), 1000);
        assert_eq!(
            parse_amount("340282366920938463463374607431768211455").expect("u128::MAX"),
            Amount::MAX
        );
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("1.5").is_err());
    }

    #[test]
    fn root_parse() {
        let root = parse_root(&format!("0x{}", "ab".repeat(32))).expect("valid root");
        assert_eq!(root, MerkleRoot::new([0xab; 32]));
        assert!(parse_root("0xabcd").is_err());
    }

    #[test]
    fn parse_rotate_root_requires_exactly_one_source() {
        let base = [
            "mair",
            "admin",
            "rotate-root",
            "--caller",
            "0x1111111111111111111111111111111111111111",
        ];
        assert!(Cli::try_parse_from(base).is_err());

        let root = format!("0x{}", "ab".repeat(32));
        let with_root = base.iter().copied().chain(["--root", root.as_str()]);
        assert!(Cli::try_parse_from(with_root).is_ok());

        let with_both = base.iter().copied().chain([
            "--root",
            root.as_str(),
            "--from-config",
            "distribution.json",
        ]);
        assert!(Cli::try_parse_from(with_both).is_err());
    }

    #[test]
    fn parse_claim_uses_default_files() {
        let cli = Cli::try_parse_from([
            "mair",
            "claim",
            "--address",
            "0x1111111111111111111111111111111111111111",
        ])
        .expect("claim should parse");
        let Commands::Claim { args } = cli.command else {
            panic!("expected claim command");
        };
        assert_eq!(args.amount, None);
        assert_eq!(args.files.ledger, PathBuf::from(DEFAULT_LEDGER_FILE));
        assert_eq!(args.files.journal, PathBuf::from(DEFAULT_JOURNAL_FILE));
    }
}

//! Admin subcommands.

use std::path::PathBuf;

use mair_core::base::{Address, Amount};
use mair_merkle::MerkleRoot;
use mair_sdk::commands::RootSource;

use super::constants::MAIR_CALLER;
use super::{LedgerFileArgs, parse_address, parse_amount, parse_root};

/// The new root of a rotation, given directly or through a distribution configuration.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct RootSourceArgs {
    /// New merkle root (`0x`-prefixed hex).
    #[arg(long, value_parser = parse_root)]
    pub root: Option<MerkleRoot>,
    /// Distribution configuration file to take the new root from.
    #[arg(long)]
    pub from_config: Option<PathBuf>,
}

impl From<RootSourceArgs> for RootSource {
    fn from(args: RootSourceArgs) -> Self {
        match (args.root, args.from_config) {
            (Some(root), _) => Self::Explicit(root),
            (None, Some(path)) => Self::Configuration(path),
            // clap requires exactly one of the two
            (None, None) => Self::Explicit(MerkleRoot::ZERO),
        }
    }
}

/// Arguments for `admin rotate-root`.
#[derive(Debug, clap::Args)]
pub struct RotateRootArgs {
    /// Ledger state and journal.
    #[command(flatten)]
    pub files: LedgerFileArgs,
    /// Address performing the rotation. Must be the administrator.
    #[arg(long, env = MAIR_CALLER, value_parser = parse_address)]
    pub caller: Address,
    /// Root to rotate to.
    #[command(flatten)]
    pub source: RootSourceArgs,
}

/// Arguments for `admin withdraw`.
#[derive(Debug, clap::Args)]
pub struct WithdrawArgs {
    /// Ledger state and journal.
    #[command(flatten)]
    pub files: LedgerFileArgs,
    /// Address performing the withdrawal. Must be the administrator.
    #[arg(long, env = MAIR_CALLER, value_parser = parse_address)]
    pub caller: Address,
    /// Amount to withdraw. Defaults to the whole vault balance.
    #[arg(long, value_parser = parse_amount)]
    pub amount: Option<Amount>,
}

/// Admin command group.
#[derive(Debug, clap::Subcommand)]
pub enum AdminCommands {
    /// Replace the committed merkle root. Existing claims stay claimed.
    RotateRoot {
        #[command(flatten)]
        args: RotateRootArgs,
    },
    /// Move tokens from the vault to the administrator.
    Withdraw {
        #[command(flatten)]
        args: WithdrawArgs,
    },
}

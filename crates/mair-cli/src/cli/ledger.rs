//! Ledger subcommands.

use std::path::PathBuf;

use mair_core::base::{Address, Amount};

use super::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_LEDGER_FILE, MAIR_ADMIN, MAIR_CONFIG_FILE, MAIR_DEPOSIT,
    MAIR_LEDGER_FILE, MAIR_VAULT,
};
use super::{parse_address, parse_amount};

/// Arguments for `ledger init`.
#[derive(Debug, clap::Args)]
pub struct LedgerInitArgs {
    /// Ledger file to create. Must not exist yet.
    #[arg(long, env = MAIR_LEDGER_FILE, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
    /// Distribution configuration whose root the ledger commits to.
    #[arg(long, env = MAIR_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Administrator allowed to rotate the root and withdraw.
    #[arg(long, env = MAIR_ADMIN, value_parser = parse_address)]
    pub admin: Address,
    /// Account holding the undistributed tokens.
    #[arg(long, env = MAIR_VAULT, value_parser = parse_address)]
    pub vault: Address,
    /// Tokens minted into the vault. Should cover the configuration's total amount.
    #[arg(long, env = MAIR_DEPOSIT, value_parser = parse_amount)]
    pub deposit: Amount,
}

/// Ledger command group.
#[derive(Debug, clap::Subcommand)]
pub enum LedgerCommands {
    /// Create a funded ledger for a distribution configuration.
    Init {
        #[command(flatten)]
        args: LedgerInitArgs,
    },
}

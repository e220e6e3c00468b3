//! Status command arguments.

use std::path::PathBuf;

use mair_core::base::Address;

use super::constants::{DEFAULT_LEDGER_FILE, MAIR_LEDGER_FILE};
use super::parse_address;

/// Arguments for `status`.
#[derive(Debug, clap::Args)]
pub struct StatusArgs {
    /// Ledger state file.
    #[arg(long, env = MAIR_LEDGER_FILE, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
    /// Also report whether this address has claimed.
    #[arg(long, value_parser = parse_address)]
    pub address: Option<Address>,
}

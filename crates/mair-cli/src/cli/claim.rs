//! Claim command arguments.

use std::path::PathBuf;

use mair_core::base::{Address, Amount};

use super::constants::{DEFAULT_PROOFS_FILE, MAIR_ADDRESS, MAIR_PROOFS_FILE};
use super::{LedgerFileArgs, parse_address, parse_amount};

/// Arguments for `claim`.
#[derive(Debug, clap::Args)]
pub struct ClaimArgs {
    /// Ledger state and journal.
    #[command(flatten)]
    pub files: LedgerFileArgs,
    /// Claim proofs file holding the recipient's proof.
    #[arg(long, env = MAIR_PROOFS_FILE, default_value = DEFAULT_PROOFS_FILE)]
    pub proofs: PathBuf,
    /// Recipient address.
    #[arg(long, env = MAIR_ADDRESS, value_parser = parse_address)]
    pub address: Address,
    /// Amount to claim. Defaults to the amount listed in the proofs file.
    #[arg(long, value_parser = parse_amount)]
    pub amount: Option<Amount>,
}

//! Tree subcommands.

use std::path::PathBuf;

use mair_merkle::MerkleRoot;

use super::constants::{
    DEFAULT_ALLOCATION_FILE, DEFAULT_CONFIG_FILE, DEFAULT_PROOFS_FILE, MAIR_ALLOCATION_FILE,
    MAIR_CONFIG_OUT, MAIR_PROOFS_FILE, MAIR_PROOFS_OUT,
};
use super::parse_root;

/// Arguments for `tree build`.
#[derive(Debug, clap::Args)]
pub struct TreeBuildArgs {
    /// Allocation list: a JSON array of `{address, amount}` or `address,amount` CSV lines.
    #[arg(long, env = MAIR_ALLOCATION_FILE, default_value = DEFAULT_ALLOCATION_FILE)]
    pub allocation: PathBuf,
    /// Distribution configuration output file.
    #[arg(long, env = MAIR_CONFIG_OUT, default_value = DEFAULT_CONFIG_FILE)]
    pub config_out: PathBuf,
    /// Claim proofs output file.
    #[arg(long, env = MAIR_PROOFS_OUT, default_value = DEFAULT_PROOFS_FILE)]
    pub proofs_out: PathBuf,
}

/// Arguments for `tree verify`.
#[derive(Debug, clap::Args)]
pub struct TreeVerifyArgs {
    /// Claim proofs file to verify.
    #[arg(long, env = MAIR_PROOFS_FILE, default_value = DEFAULT_PROOFS_FILE)]
    pub proofs: PathBuf,
    /// Verify against this root instead of the one recorded in the proofs file.
    #[arg(long, value_parser = parse_root)]
    pub root: Option<MerkleRoot>,
}

/// Tree command group.
#[derive(Debug, clap::Subcommand)]
pub enum TreeCommands {
    /// Build the Merkle tree of an allocation list and export the root and claim proofs.
    Build {
        #[command(flatten)]
        args: TreeBuildArgs,
    },
    /// Verify every proof of a claim proofs file.
    Verify {
        #[command(flatten)]
        args: TreeVerifyArgs,
    },
    /// Print the JSON schemas of the allocation list and the distribution configuration.
    Schema,
}

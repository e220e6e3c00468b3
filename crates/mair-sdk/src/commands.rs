//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod admin;
mod allocation_input;
mod claim;
mod distribution;
mod files;
mod ledger_init;
mod ledger_store;
mod status;
#[cfg(test)]
mod test_support;

pub use admin::{RootSource, rotate_root, withdraw};
pub use claim::claim;
pub use distribution::{build_distribution, verify_proofs};
pub use ledger_init::init_ledger;
pub use ledger_store::read_journal;
pub use status::{LedgerStatus, ledger_status, print_status};

/// Generates and prints the JSON schemas of the allocation list input and the
/// `DistributionConfiguration` output.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn distribution_schema() -> eyre::Result<()> {
    let allocation =
        schemars::schema_for!(Vec<mair_core::schema::allocation::AllocationEntry>);
    let configuration =
        schemars::schema_for!(mair_core::schema::config::DistributionConfiguration);
    println!(
        "Allocation List JSON Schema:\n{}",
        serde_json::to_string_pretty(&allocation)?
    );
    println!(
        "Distribution Configuration JSON Schema:\n{}",
        serde_json::to_string_pretty(&configuration)?
    );
    Ok(())
}

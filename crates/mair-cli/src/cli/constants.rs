//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Common
pub const MAIR_LEDGER_FILE: &str = "MAIR_LEDGER_FILE";
pub const MAIR_JOURNAL_FILE: &str = "MAIR_JOURNAL_FILE";
pub const MAIR_CONFIG_FILE: &str = "MAIR_CONFIG_FILE";
pub const MAIR_PROOFS_FILE: &str = "MAIR_PROOFS_FILE";

// Tree
pub const MAIR_ALLOCATION_FILE: &str = "MAIR_ALLOCATION_FILE";
pub const MAIR_CONFIG_OUT: &str = "MAIR_CONFIG_OUT";
pub const MAIR_PROOFS_OUT: &str = "MAIR_PROOFS_OUT";

// Ledger
pub const MAIR_ADMIN: &str = "MAIR_ADMIN";
pub const MAIR_VAULT: &str = "MAIR_VAULT";
pub const MAIR_DEPOSIT: &str = "MAIR_DEPOSIT";

// Claim / admin
pub const MAIR_ADDRESS: &str = "MAIR_ADDRESS";
pub const MAIR_CALLER: &str = "MAIR_CALLER";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_ALLOCATION_FILE: &str = "allocation.json";
pub const DEFAULT_CONFIG_FILE: &str = "distribution.json";
pub const DEFAULT_PROOFS_FILE: &str = "claim-proofs.json";
pub const DEFAULT_LEDGER_FILE: &str = "ledger.json";
pub const DEFAULT_JOURNAL_FILE: &str = "ledger-events.jsonl";

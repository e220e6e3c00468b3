//! Serialized schema/data contracts.

/// Allocation list input schema types.
pub mod allocation;
/// Distribution configuration schema types.
pub mod config;
/// Claim proof interchange schema types.
pub mod proofs;
/// Persisted ledger state schema types.
pub mod state;

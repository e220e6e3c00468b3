//! File-based workflows for building, verifying and claiming Merkle airdrops.

pub mod commands;

//! Shared test utilities for the workspace.

use mair_core::base::{ADDRESS_SIZE, Address, Amount};
use mair_core::schema::allocation::AllocationEntry;

/// Helper macro to create an allocation list from `(byte, amount)` pairs.
///
/// Each address is the given byte repeated over all 20 address bytes, see [`address`].
#[macro_export]
macro_rules! allocation {
    ($(($byte:expr, $amount:expr)),* $(,)?) => {{
        vec![$( ::mair_core::schema::allocation::AllocationEntry::new(
            $crate::address($byte),
            $amount,
        ) ),*]
    }};
}

/// Deterministic address made of a single repeated byte.
#[must_use]
pub const fn address(byte: u8) -> Address {
    Address::new([byte; ADDRESS_SIZE])
}

/// The three-recipient allocation used throughout the claim scenario tests:
/// `0x11..` gets 100, `0x22..` gets 200 and `0x33..` gets 300.
#[must_use]
pub fn sample_allocation() -> Vec<AllocationEntry> {
    allocation![(0x11, 100), (0x22, 200), (0x33, 300)]
}

/// An allocation with `count` recipients `0x01..`, `0x02..`, ... where recipient `n` gets
/// `n * 100`.
#[must_use]
pub fn numbered_allocation(count: u8) -> Vec<AllocationEntry> {
    (1..=count)
        .map(|n| AllocationEntry::new(address(n), Amount::from(n).saturating_mul(100)))
        .collect()
}

/// Sum of the amounts of an allocation list.
#[must_use]
pub fn total(entries: &[AllocationEntry]) -> Amount {
    entries
        .iter()
        .fold(0, |sum, entry| sum.saturating_add(entry.amount))
}

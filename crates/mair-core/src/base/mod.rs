//! Foundational primitive types and byte/serde helpers.

mod address;
mod amount;
mod utils;

pub use address::{ADDRESS_SIZE, Address, AddressParseError};
pub use amount::{AMOUNT_WORD_SIZE, Amount, amount_word};
pub use utils::{HASH_SIZE, PrefixedHex, decode_prefixed_hex};

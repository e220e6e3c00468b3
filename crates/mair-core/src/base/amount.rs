//! Token amounts.

/// Token quantity in the smallest indivisible unit.
pub type Amount = u128;

/// Width of the amount word in a leaf preimage (a `uint256`).
pub const AMOUNT_WORD_SIZE: usize = 32;

/// Encode an amount as a 32-byte big-endian word, left-padded with zeros.
///
/// This is the canonical fixed-width encoding of the amount field inside a leaf, identical to
/// how `abi.encodePacked` lays out a `uint256`.
#[must_use]
pub fn amount_word(amount: Amount) -> [u8; AMOUNT_WORD_SIZE] {
    let mut word = [0_u8; AMOUNT_WORD_SIZE];
    let (_, low) = word.split_at_mut(AMOUNT_WORD_SIZE.saturating_sub(size_of::<Amount>()));
    low.copy_from_slice(&amount.to_be_bytes());
    word
}

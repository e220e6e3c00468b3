//! Recipient/principal address type.

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Size in bytes of an account address.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte account identifier.
///
/// Addresses identify recipients, the administrator and the vault that holds undistributed
/// tokens. They render as `0x`-prefixed lowercase hex and serialize as strings, which also
/// lets them key JSON maps.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, SerializeDisplay, DeserializeFromStr,
)]
pub struct Address([u8; ADDRESS_SIZE]);

/// Errors produced when parsing an [`Address`] from text.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AddressParseError {
    /// The input does not contain exactly 40 hex digits.
    #[error("Invalid address length: expected 40 hex chars, got {0}")]
    InvalidLength(usize),
    /// The input contains non-hex characters.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// The zero address is never a valid participant.
    #[error("Zero address not allowed")]
    Zero,
}

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0_u8; ADDRESS_SIZE]);

    /// Create an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    /// Whether this is the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl AsRef<[u8; ADDRESS_SIZE]> for Address {
    fn as_ref(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_SIZE] {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Parses an address with or without the `0x` prefix. Mixed-case (checksummed) input is
    /// accepted; the checksum itself is not validated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != ADDRESS_SIZE.saturating_mul(2) {
            return Err(AddressParseError::InvalidLength(digits.len()));
        }
        let mut bytes = [0_u8; ADDRESS_SIZE];
        hex::decode_to_slice(digits, &mut bytes)?;
        let address = Self(bytes);
        if address.is_zero() {
            return Err(AddressParseError::Zero);
        }
        Ok(address)
    }
}

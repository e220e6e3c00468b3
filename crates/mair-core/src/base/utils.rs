//! Utility functions for core primitive types.

/// Size in bytes of every hash value (leaves, nodes, roots).
pub const HASH_SIZE: usize = 32;

/// A `serde_as` adapter that hex encodes fixed-size byte arrays with a `0x` prefix.
///
/// This is the representation EVM tooling uses for `bytes32` values, so roots and proofs
/// written by this workspace can be pasted into contract calls unchanged. Deserialization
/// accepts the value with or without the prefix.
pub struct PrefixedHex;

impl<const N: usize> serde_with::SerializeAs<[u8; N]> for PrefixedHex {
    fn serialize_as<S>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }
}

impl<'de, const N: usize> serde_with::DeserializeAs<'de, [u8; N]> for PrefixedHex {
    fn deserialize_as<D>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = <String as serde::Deserialize>::deserialize(deserializer)?;
        decode_prefixed_hex(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Decode a hex string, with or without a `0x` prefix, into a fixed-size array.
///
/// # Errors
/// Returns an error if the string is not valid hex or does not decode to exactly `N` bytes.
pub fn decode_prefixed_hex<const N: usize>(encoded: &str) -> Result<[u8; N], hex::FromHexError> {
    let trimmed = encoded.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let mut out = [0_u8; N];
    hex::decode_to_slice(digits, &mut out)?;
    Ok(out)
}

//! Serde helpers for byte vectors written as `0x` prefixed hex strings.

use serde::{
    Deserialize,
    Deserializer,
    Serializer,
};

/// Decodes hex with an optional `0x` prefix.
pub fn decode(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

/// Encodes bytes as `0x` prefixed lowercase hex.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Serializes bytes as `0x` prefixed hex.
pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode(bytes))
}

/// Deserializes bytes from hex with an optional `0x` prefix.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    decode(&s).map_err(serde::de::Error::custom)
}

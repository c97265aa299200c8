use pc_e2e_types::serde_hex;
use serde::{
    Deserialize,
    Serialize,
};

/// Bytes written between the engine id and the payload of a consensus log
/// when re-encoding a header for hashing.
///
/// Which of the two is used depends on the payload; see the authorship codec.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct HeaderEncodingConfig {
    /// Suffix used for Grandpa authority set change logs.
    #[serde(rename = "block_encoding_suffix_grandpa", with = "serde_hex")]
    pub grandpa_suffix: Vec<u8>,
    /// Suffix used for every other consensus log.
    #[serde(rename = "block_encoding_suffix_aura", with = "serde_hex")]
    pub aura_suffix: Vec<u8>,
}

impl HeaderEncodingConfig {
    /// Suffixes of the local three-authority testnet: the compact lengths of
    /// its Grandpa `ScheduledChange` and Aura authorities payloads.
    pub fn local_testnet() -> Self {
        Self {
            grandpa_suffix: vec![0xf9, 0x01],
            aura_suffix: vec![0x89, 0x01],
        }
    }
}

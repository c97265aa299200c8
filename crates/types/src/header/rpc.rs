//! The JSON shape of block headers returned by the partner chain RPC layer.

use super::{
    BlockHeader,
    DigestLog,
    EngineId,
};
use crate::{
    primitives::{
        BlockNumber,
        Bytes32,
    },
    serde_hex,
};
use serde::{
    de,
    Deserialize,
    Deserializer,
    Serialize,
};

/// Error converting an RPC header into a [`BlockHeader`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("digest log {index}: {reason}")]
pub struct InvalidDigestLog {
    /// Position of the log within the digest.
    pub index: usize,
    /// What is wrong with it.
    pub reason: String,
}

/// A block header as serialized by the RPC layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlockHeader {
    /// Hash of the parent block.
    pub parent_hash: Bytes32,
    /// Block number, either an integer or a hex string.
    #[serde(deserialize_with = "block_number")]
    pub number: BlockNumber,
    /// State root.
    pub state_root: Bytes32,
    /// Extrinsics root.
    pub extrinsics_root: Bytes32,
    /// Digest of the header.
    pub digest: RpcDigest,
}

/// Digest section of an RPC header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcDigest {
    /// Logs in node order.
    pub logs: Vec<RpcDigestLog>,
}

/// A digest log as an `(engine id, payload)` tuple keyed by its variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcDigestLog {
    /// Pre-runtime log.
    PreRuntime(String, String),
    /// Consensus log.
    Consensus(String, String),
    /// Seal log.
    Seal(String, String),
}

/// Interprets an RPC payload string.
///
/// Payloads that parse as hex (with or without `0x`) are taken as the decoded
/// bytes. Anything else is taken as its UTF-8 bytes.
pub fn payload_bytes(raw: &str) -> Vec<u8> {
    serde_hex::decode(raw).unwrap_or_else(|_| raw.as_bytes().to_vec())
}

/// Engine ids arrive either as `0x` prefixed hex or as their four ASCII
/// characters. Bare four character ids are always ASCII, so `BABE` stays `BABE`.
fn engine_id(raw: &str, index: usize) -> Result<EngineId, InvalidDigestLog> {
    let bytes = if !raw.starts_with("0x") && raw.len() == 4 {
        raw.as_bytes().to_vec()
    } else {
        payload_bytes(raw)
    };
    bytes.as_slice().try_into().map_err(|_| InvalidDigestLog {
        index,
        reason: format!("engine id `{raw}` is not 4 bytes long"),
    })
}

impl TryFrom<RpcBlockHeader> for BlockHeader {
    type Error = InvalidDigestLog;

    fn try_from(header: RpcBlockHeader) -> Result<Self, Self::Error> {
        let digest_logs = header
            .digest
            .logs
            .iter()
            .enumerate()
            .map(|(index, log)| {
                Ok(match log {
                    RpcDigestLog::PreRuntime(engine, payload) => DigestLog::PreRuntime {
                        engine_id: engine_id(engine, index)?,
                        payload: payload_bytes(payload),
                    },
                    RpcDigestLog::Consensus(engine, payload) => DigestLog::Consensus {
                        engine_id: engine_id(engine, index)?,
                        payload: payload_bytes(payload),
                    },
                    RpcDigestLog::Seal(engine, signature) => DigestLog::Seal {
                        engine_id: engine_id(engine, index)?,
                        signature: payload_bytes(signature),
                    },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BlockHeader {
            number: header.number,
            parent_hash: header.parent_hash,
            state_root: header.state_root,
            extrinsics_root: header.extrinsics_root,
            digest_logs,
        })
    }
}

impl From<&BlockHeader> for RpcBlockHeader {
    fn from(header: &BlockHeader) -> Self {
        let logs = header
            .digest_logs
            .iter()
            .map(|log| match log {
                DigestLog::PreRuntime { engine_id, payload } => RpcDigestLog::PreRuntime(
                    serde_hex::encode(engine_id),
                    serde_hex::encode(payload),
                ),
                DigestLog::Consensus { engine_id, payload } => RpcDigestLog::Consensus(
                    serde_hex::encode(engine_id),
                    serde_hex::encode(payload),
                ),
                DigestLog::Seal {
                    engine_id,
                    signature,
                } => RpcDigestLog::Seal(
                    serde_hex::encode(engine_id),
                    serde_hex::encode(signature),
                ),
            })
            .collect();

        RpcBlockHeader {
            parent_hash: header.parent_hash,
            number: header.number,
            state_root: header.state_root,
            extrinsics_root: header.extrinsics_root,
            digest: RpcDigest { logs },
        }
    }
}

fn block_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BlockNumber, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Integer(u64),
        Text(String),
    }

    match Number::deserialize(deserializer)? {
        Number::Integer(number) => Ok(number),
        Number::Text(text) => match text.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).map_err(de::Error::custom),
            None => text.parse().map_err(de::Error::custom),
        },
    }
}

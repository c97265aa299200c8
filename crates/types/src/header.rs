//! Partner chain block header and digest log types.

use crate::primitives::{
    BlockNumber,
    Bytes32,
};

pub mod rpc;

/// Four byte identifier of a consensus engine.
pub type EngineId = [u8; 4];

/// Engine id of Aura block authoring.
pub const AURA_ENGINE_ID: EngineId = *b"aura";

/// Engine id of the main chain hash pre-runtime log.
pub const MC_HASH_ENGINE_ID: EngineId = *b"mcsh";

/// Engine id of Grandpa finality.
pub const GRANDPA_ENGINE_ID: EngineId = *b"FRNK";

/// A tagged metadata entry of a block header digest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DigestLog {
    /// Data provided to the runtime before block execution.
    PreRuntime {
        /// Engine that produced the log.
        engine_id: EngineId,
        /// Engine specific payload.
        payload: Vec<u8>,
    },
    /// Messages from the runtime to a consensus engine.
    Consensus {
        /// Engine the log is addressed to.
        engine_id: EngineId,
        /// Engine specific payload.
        payload: Vec<u8>,
    },
    /// The block author's signature over the rest of the header.
    Seal {
        /// Engine that sealed the block.
        engine_id: EngineId,
        /// Signature bytes.
        signature: Vec<u8>,
    },
}

impl DigestLog {
    /// Engine id of the log.
    pub fn engine_id(&self) -> &EngineId {
        match self {
            DigestLog::PreRuntime { engine_id, .. }
            | DigestLog::Consensus { engine_id, .. }
            | DigestLog::Seal { engine_id, .. } => engine_id,
        }
    }

    /// Name of the log variant, as used by the RPC layer.
    pub fn kind(&self) -> &'static str {
        match self {
            DigestLog::PreRuntime { .. } => "PreRuntime",
            DigestLog::Consensus { .. } => "Consensus",
            DigestLog::Seal { .. } => "Seal",
        }
    }

    /// The payload or signature bytes.
    pub fn data(&self) -> &[u8] {
        match self {
            DigestLog::PreRuntime { payload, .. } | DigestLog::Consensus { payload, .. } => {
                payload
            }
            DigestLog::Seal { signature, .. } => signature,
        }
    }

    /// Mutable access to the payload or signature bytes.
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        match self {
            DigestLog::PreRuntime { payload, .. } | DigestLog::Consensus { payload, .. } => {
                payload
            }
            DigestLog::Seal { signature, .. } => signature,
        }
    }
}

/// A partner chain block header as fetched from a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockHeader {
    /// Height of the block.
    pub number: BlockNumber,
    /// Hash of the parent block.
    pub parent_hash: Bytes32,
    /// Root of the state trie after the block.
    pub state_root: Bytes32,
    /// Root of the block's extrinsics.
    pub extrinsics_root: Bytes32,
    /// Digest logs in the order the node reported them.
    pub digest_logs: Vec<DigestLog>,
}

impl BlockHeader {
    /// Payload of the first pre-runtime log emitted by `engine_id`.
    pub fn pre_runtime(&self, engine_id: &EngineId) -> Option<&[u8]> {
        self.digest_logs.iter().find_map(|log| match log {
            DigestLog::PreRuntime {
                engine_id: id,
                payload,
            } if id == engine_id => Some(payload.as_slice()),
            _ => None,
        })
    }

    /// Number of consensus logs in the digest.
    pub fn consensus_log_count(&self) -> usize {
        self.digest_logs
            .iter()
            .filter(|log| matches!(log, DigestLog::Consensus { .. }))
            .count()
    }
}

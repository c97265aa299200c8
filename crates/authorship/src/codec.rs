//! The pre-seal encoding of a partner chain header.
//!
//! A block author hashes the header before its `Seal` log is added and signs
//! that hash. Reproducing those bytes exactly lets anyone check the seal
//! without trusting the node that served the header.

use crate::{
    Error,
    Result,
};
use pc_e2e_chain_config::HeaderEncodingConfig;
use pc_e2e_types::{
    codec,
    crypto::blake2_256,
    header::rpc::RpcBlockHeader,
    BlockHeader,
    Bytes32,
    DigestLog,
};


const PRE_RUNTIME_TAG: u8 = 0x06;
const CONSENSUS_TAG: u8 = 0x04;

/// Marker found in the hex of Grandpa authority set changes, the little-endian
/// `u64` weight `1` of an authority.
const GRANDPA_MARKER: &str = "0100000000000000";

/// A header's signed bytes, split from its seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedHeader {
    /// The bytes the author hashed.
    pub preimage: Vec<u8>,
    /// BLAKE2b-256 of `preimage`, the message the seal signs.
    pub hash: Bytes32,
    /// Signature carried by the `Seal` log.
    pub signature: Vec<u8>,
}

/// The two known consensus log layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsensusSuffix {
    Grandpa,
    Aura,
}

impl ConsensusSuffix {
    /// Picks the layout of a consensus log from its payload.
    ///
    /// The payload carries no explicit tag, so Grandpa logs are recognised by
    /// the authority weight marker in their hex form. Nothing guarantees the
    /// marker never occurs in an Aura payload.
    pub fn detect(payload: &[u8]) -> Self {
        if hex::encode(payload).contains(GRANDPA_MARKER) {
            ConsensusSuffix::Grandpa
        } else {
            ConsensusSuffix::Aura
        }
    }

    pub fn bytes<'a>(&self, config: &'a HeaderEncodingConfig) -> &'a [u8] {
        match self {
            ConsensusSuffix::Grandpa => &config.grandpa_suffix,
            ConsensusSuffix::Aura => &config.aura_suffix,
        }
    }
}

/// The digest length prefix for the number of consensus logs in a header
/// whose other logs are the two pre-runtime ones.
fn digest_prefix(number: u64, consensus_logs: usize) -> Result<u8> {
    match consensus_logs {
        0 => Ok(0x08),
        1 => Ok(0x0c),
        2 => Ok(0x10),
        _ => Err(Error::UnsupportedDigestShape {
            number,
            consensus_logs,
        }),
    }
}

/// Encodes `header` the way its author did before sealing it.
///
/// Digest logs are written in their original order without the seal. A header
/// must carry exactly one `Seal` log.
pub fn encode_header_for_hashing(
    header: &BlockHeader,
    config: &HeaderEncodingConfig,
) -> Result<EncodedHeader> {
    let number = header.number;
    let prefix = digest_prefix(number, header.consensus_log_count())?;

    let mut preimage = Vec::with_capacity(32 * 3 + 16 + 64 * header.digest_logs.len());
    preimage.extend_from_slice(header.parent_hash.as_ref());
    codec::encode_compact(number, &mut preimage);
    preimage.extend_from_slice(header.state_root.as_ref());
    preimage.extend_from_slice(header.extrinsics_root.as_ref());
    preimage.push(prefix);

    let mut seal = None;
    for (index, log) in header.digest_logs.iter().enumerate() {
        match log {
            DigestLog::PreRuntime { engine_id, payload } => {
                preimage.push(PRE_RUNTIME_TAG);
                preimage.extend_from_slice(engine_id);
                codec::encode_bytes(payload, &mut preimage);
            }
            DigestLog::Consensus { engine_id, payload } => {
                preimage.push(CONSENSUS_TAG);
                preimage.extend_from_slice(engine_id);
                preimage.extend_from_slice(ConsensusSuffix::detect(payload).bytes(config));
                preimage.extend_from_slice(payload);
            }
            DigestLog::Seal { signature, .. } => {
                if seal.is_some() {
                    return Err(Error::malformed(
                        number,
                        Some(index),
                        "more than one seal",
                    ))
                }
                seal = Some(signature.clone());
            }
        }
    }

    let signature = seal.ok_or_else(|| Error::malformed(number, None, "missing seal"))?;
    let hash = Bytes32::new(blake2_256(&preimage));
    tracing::trace!(number, %hash, "encoded header for hashing");

    Ok(EncodedHeader {
        preimage,
        hash,
        signature,
    })
}

/// Converts a header fetched over RPC, attributing bad digest logs to the
/// block.
pub fn parse_rpc_header(header: RpcBlockHeader) -> Result<BlockHeader> {
    let number = header.number;
    BlockHeader::try_from(header)
        .map_err(|err| Error::malformed(number, Some(err.index), err.reason))
}

//! Builders for sealed headers.

use crate::codec::encode_header_for_hashing;
use pc_e2e_chain_config::HeaderEncodingConfig;
use pc_e2e_types::{
    crypto::blake2_256,
    header::{
        AURA_ENGINE_ID,
        MC_HASH_ENGINE_ID,
    },
    test_helpers::TestSigner,
    BlockHeader,
    BlockNumber,
    Bytes32,
    DigestLog,
};

/// A header with the `aura` slot and `mcsh` pre-runtime logs and no seal.
pub fn unsealed_header(number: BlockNumber, slot: u64) -> BlockHeader {
    let hash_of = |tag: &[u8]| {
        let mut data = tag.to_vec();
        data.extend_from_slice(&number.to_le_bytes());
        Bytes32::new(blake2_256(&data))
    };

    BlockHeader {
        number,
        parent_hash: hash_of(b"parent"),
        state_root: hash_of(b"state"),
        extrinsics_root: hash_of(b"extrinsics"),
        digest_logs: vec![
            DigestLog::PreRuntime {
                engine_id: AURA_ENGINE_ID,
                payload: slot.to_le_bytes().to_vec(),
            },
            DigestLog::PreRuntime {
                engine_id: MC_HASH_ENGINE_ID,
                payload: hash_of(b"main chain").as_bytes().to_vec(),
            },
        ],
    }
}

/// Appends a seal by `signer` over the pre-seal hash of `header`.
pub fn seal(header: &mut BlockHeader, signer: &TestSigner, encoding: &HeaderEncodingConfig) {
    header.digest_logs.push(DigestLog::Seal {
        engine_id: AURA_ENGINE_ID,
        signature: Vec::new(),
    });
    let encoded = encode_header_for_hashing(header, encoding)
        .expect("test headers have one seal and at most two consensus logs");
    let signature = signer.sign(encoded.hash.as_ref());
    if let Some(DigestLog::Seal { signature: seal, .. }) = header.digest_logs.last_mut() {
        *seal = signature;
    }
}

/// A header for `slot` sealed by `signer`.
pub fn sealed_header(
    number: BlockNumber,
    slot: u64,
    signer: &TestSigner,
    encoding: &HeaderEncodingConfig,
) -> BlockHeader {
    let mut header = unsealed_header(number, slot);
    seal(&mut header, signer, encoding);
    header
}

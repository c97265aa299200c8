use crate::helpers::TwoChain;
use pc_e2e_authorship::{
    codec::parse_rpc_header,
    encode_header_for_hashing,
    test_helpers::{
        seal,
        unsealed_header,
    },
    verify_author,
    AuthorshipVerifier,
    Error,
};
use pc_e2e_chain_config::HeaderEncodingConfig;
use pc_e2e_tx_signer::EcdsaKeypair;
use pc_e2e_types::{
    header::{
        rpc::RpcBlockHeader,
        GRANDPA_ENGINE_ID,
    },
    serde_hex,
    BlockHeader,
    CommitteeMember,
    DigestLog,
    SignatureScheme,
};
use serde_json::json;

/// The header as a node serves it: hex encoded number, ASCII engine ids.
fn node_json(header: &BlockHeader) -> serde_json::Value {
    let logs: Vec<_> = header
        .digest_logs
        .iter()
        .map(|log| {
            let engine = String::from_utf8_lossy(log.engine_id()).into_owned();
            json!({ (log.kind()): [engine, serde_hex::encode(log.data())] })
        })
        .collect();

    json!({
        "parentHash": header.parent_hash,
        "number": format!("0x{:x}", header.number),
        "stateRoot": header.state_root,
        "extrinsicsRoot": header.extrinsics_root,
        "digest": { "logs": logs },
    })
}

#[test]
fn headers_served_by_node_verify_against_committee() {
    let chain = TwoChain::new(30, [4, 5]);
    let members = chain.members();
    let verifier = AuthorshipVerifier::new(chain.config.block_encoding.clone());

    for number in 0..=chain.latest_block() {
        let json = node_json(chain.header(number));
        let rpc: RpcBlockHeader = serde_json::from_value(json).unwrap();

        let header = parse_rpc_header(rpc).unwrap();

        assert_eq!(&header, chain.header(number));
        verifier.attribute(&header, &members).unwrap();
    }
}

#[test]
fn header_with_grandpa_and_aura_consensus_logs_verifies() {
    let encoding = HeaderEncodingConfig::local_testnet();
    let chain = TwoChain::new(1, []);
    let author = &chain.committee[2];
    let mut header = unsealed_header(40, 12);
    header.digest_logs.push(DigestLog::Consensus {
        engine_id: GRANDPA_ENGINE_ID,
        // one authority of weight 1
        payload: [vec![0x01, 0x04], vec![0xab; 32], 1u64.to_le_bytes().to_vec()].concat(),
    });
    header.digest_logs.push(DigestLog::Consensus {
        engine_id: *b"aura",
        payload: vec![0x04, 0x01],
    });
    seal(&mut header, author, &encoding);

    let encoded = encode_header_for_hashing(&header, &encoding).unwrap();

    assert_eq!(encoded.preimage[32 + 1 + 64], 0x10);
    assert_eq!(
        verify_author(&encoded.hash, &encoded.signature, &chain.members()),
        Some(&author.member())
    );
}

#[test]
fn block_sealed_with_wallet_key_verifies_as_ecdsa_member() {
    let encoding = HeaderEncodingConfig::local_testnet();
    let keypair = EcdsaKeypair::from_secret_bytes(&[0x42; 32]).unwrap();
    let member = CommitteeMember::new(keypair.public_key(), SignatureScheme::Ecdsa);
    let mut header = unsealed_header(9, 9);
    header.digest_logs.push(DigestLog::Seal {
        engine_id: *b"aura",
        signature: Vec::new(),
    });
    let hash = encode_header_for_hashing(&header, &encoding).unwrap().hash;
    let signature = keypair.sign(hash.as_ref()).unwrap();
    if let Some(DigestLog::Seal { signature: seal_signature, .. }) = header.digest_logs.last_mut() {
        *seal_signature = signature.to_vec();
    }

    let author = AuthorshipVerifier::new(encoding)
        .verify_header(&header, std::slice::from_ref(&member))
        .unwrap();

    assert_eq!(author, &member);
}

#[test]
fn committee_rotation_is_detected_as_hash_mismatch() {
    let chain = TwoChain::new(12, []);
    let verifier = AuthorshipVerifier::new(chain.config.block_encoding.clone());
    let next_committee: Vec<_> = [
        (SignatureScheme::Sr25519, 11),
        (SignatureScheme::Ed25519, 12),
        (SignatureScheme::Ecdsa, 13),
    ]
    .into_iter()
    .map(|(scheme, seed)| pc_e2e_types::test_helpers::TestSigner::new(scheme, seed).member())
    .collect();

    let err = verifier
        .attribute(chain.header(3), &next_committee)
        .unwrap_err();

    assert!(matches!(err, Error::HashMismatch { number: 3, .. }));
}

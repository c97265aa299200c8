use crate::helpers::TwoChain;
use pc_e2e_tx_signer::{
    signing_payload,
    EcdsaKeypair,
    EcdsaSigner,
    RuntimeContext,
    SigningError,
    TipPayment,
};
use pc_e2e_types::{
    codec,
    extrinsic::{
        Call,
        Era,
        EraSpec,
        SignatureType,
    },
    Bytes32,
    CommitteeMember,
    SignatureScheme,
};
use pretty_assertions::assert_eq;

fn runtime() -> RuntimeContext {
    RuntimeContext {
        genesis_hash: Bytes32::new([0x99; 32]),
        spec_version: 130,
        transaction_version: 2,
        signature_type: SignatureType::MultiSignature,
        tip_payment: TipPayment::Native,
    }
}

fn register_candidate() -> Call {
    Call {
        call_module: "SessionCommitteeManagement".into(),
        call_function: "register".into(),
        call_args: serde_json::json!({ "sidechain_signature": "0x01" }),
        encoded: [vec![0x16, 0x00], vec![0x55; 300]].concat(),
    }
}

#[tokio::test]
async fn mortal_extrinsic_signed_against_chain_verifies_as_ecdsa() {
    let keypair = EcdsaKeypair::from_secret_bytes(&[0x31; 32]).unwrap();
    let chain = TwoChain::new(40, [7]).with_nonce(keypair.account_id(), 12);
    let finalized = chain.latest_block();
    let signer = EcdsaSigner::new(chain.clone(), runtime());
    let call = register_candidate();

    let signed = signer
        .sign_ecdsa_extrinsic(
            &call,
            &keypair,
            None,
            EraSpec::Mortal {
                period: 32,
                current: None,
            },
            0,
            None,
        )
        .await
        .unwrap();

    let era = Era::mortal(32, finalized);
    let checkpoint = chain.block_hash(era.birth(finalized)).unwrap();
    let payload = signing_payload(&call.encoded, &era, 12, 0, None, &runtime(), &checkpoint);
    // the call alone exceeds the unhashed payload limit
    assert_eq!(payload.len(), 32);
    let wallet = CommitteeMember::new(keypair.public_key(), SignatureScheme::Ecdsa);
    assert!(wallet.signed(&payload, &signed.signature));
    assert_eq!((signed.nonce, signed.era), (12, era));
    assert_eq!(signed.signature_version, Some(2));
}

#[tokio::test]
async fn encoded_extrinsic_length_prefix_covers_body() {
    let keypair = EcdsaKeypair::generate();
    let signer = EcdsaSigner::new(TwoChain::new(10, []), runtime());

    let signed = signer
        .sign_ecdsa_extrinsic(
            &register_candidate(),
            &keypair,
            Some(0),
            EraSpec::Immortal,
            1_000,
            None,
        )
        .await
        .unwrap();
    let encoded = signed.encode_extrinsic();

    let (length, prefix) = codec::decode_compact(&encoded).unwrap();
    assert_eq!(length as usize + prefix, encoded.len());
    assert!(encoded.ends_with(&register_candidate().encoded));
}

#[tokio::test]
async fn era_checkpoint_beyond_chain_head_fails() {
    let keypair = EcdsaKeypair::generate();
    let signer = EcdsaSigner::new(TwoChain::new(10, []), runtime());

    let err = signer
        .sign_ecdsa_extrinsic(
            &register_candidate(),
            &keypair,
            Some(0),
            EraSpec::Mortal {
                period: 4,
                current: Some(500),
            },
            0,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SigningError::CheckpointHash { block: 500, .. }));
}

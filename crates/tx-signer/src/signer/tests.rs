#![allow(non_snake_case)]

use super::*;
use crate::ports::MockChainState;
use mockall::predicate::eq;
use pc_e2e_types::{
    codec,
    crypto::ecdsa_verify,
    extrinsic::{
        SignatureType,
        SIGNED_EXTRINSIC_VERSION,
    },
};

const GENESIS: Bytes32 = Bytes32::new([0x11; 32]);

fn runtime(signature_type: SignatureType, tip_payment: TipPayment) -> RuntimeContext {
    RuntimeContext {
        genesis_hash: GENESIS,
        spec_version: 120,
        transaction_version: 1,
        signature_type,
        tip_payment,
    }
}

fn remark() -> Call {
    Call {
        call_module: "System".into(),
        call_function: "remark".into(),
        call_args: serde_json::json!({ "remark": "0x2a" }),
        encoded: vec![0x00, 0x00, 0x04, 0x2a],
    }
}

fn keypair() -> EcdsaKeypair {
    EcdsaKeypair::from_secret_bytes(&[7; 32]).unwrap()
}

fn signer(chain: MockChainState) -> EcdsaSigner<MockChainState> {
    EcdsaSigner::new(
        chain,
        runtime(SignatureType::MultiSignature, TipPayment::Native),
    )
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__signs_blake2_digest_of_payload() {
    let keypair = keypair();
    let signer = signer(MockChainState::new());

    let signed = signer
        .sign_ecdsa_extrinsic(&remark(), &keypair, Some(4), EraSpec::Immortal, 0, None)
        .await
        .unwrap();

    let payload = signing_payload(
        &remark().encoded,
        &Era::Immortal,
        4,
        0,
        None,
        signer.runtime(),
        &GENESIS,
    );
    assert!(ecdsa_verify(&payload, &signed.signature, &keypair.public_key()));
    assert!(SignatureScheme::Ecdsa.verify(
        &payload,
        &signed.signature,
        &keypair.public_key()
    ));
    assert_eq!(signed.account_id, keypair.account_id());
    assert_eq!(signed.nonce, 4);
    assert_eq!(signed.era, Era::Immortal);
    assert_eq!(signed.call_module, "System");
    assert_eq!(signed.call, remark().encoded);
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__fetches_missing_nonce() {
    let keypair = keypair();
    let mut chain = MockChainState::new();
    chain
        .expect_account_nonce()
        .with(eq(keypair.account_id()))
        .times(1)
        .returning(|_| Ok(Some(9)));

    let signed = signer(chain)
        .sign_ecdsa_extrinsic(&remark(), &keypair, None, EraSpec::Immortal, 0, None)
        .await
        .unwrap();

    assert_eq!(signed.nonce, 9);
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__unknown_account_starts_at_nonce_zero() {
    let mut chain = MockChainState::new();
    chain.expect_account_nonce().returning(|_| Ok(None));

    let signed = signer(chain)
        .sign_ecdsa_extrinsic(&remark(), &keypair(), None, EraSpec::Immortal, 0, None)
        .await
        .unwrap();

    assert_eq!(signed.nonce, 0);
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__resolves_mortal_era_at_finalized_block() {
    let keypair = keypair();
    let checkpoint = Bytes32::new([0x22; 32]);
    let mut chain = MockChainState::new();
    chain.expect_finalized_block_number().returning(|| Ok(1010));
    chain
        .expect_block_hash()
        .with(eq(1010))
        .times(1)
        .returning(move |_| Ok(checkpoint));
    let signer = signer(chain);

    let signed = signer
        .sign_ecdsa_extrinsic(
            &remark(),
            &keypair,
            Some(0),
            EraSpec::Mortal {
                period: 64,
                current: None,
            },
            0,
            None,
        )
        .await
        .unwrap();

    let era = Era::mortal(64, 1010);
    assert_eq!(signed.era, era);
    let payload = signing_payload(
        &remark().encoded,
        &era,
        0,
        0,
        None,
        signer.runtime(),
        &checkpoint,
    );
    assert!(ecdsa_verify(&payload, &signed.signature, &keypair.public_key()));
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__uses_given_reference_block() {
    let mut chain = MockChainState::new();
    chain.expect_finalized_block_number().never();
    chain
        .expect_block_hash()
        .with(eq(100))
        .returning(|_| Ok(Bytes32::zeroed()));

    let signed = signer(chain)
        .sign_ecdsa_extrinsic(
            &remark(),
            &keypair(),
            Some(0),
            EraSpec::Mortal {
                period: 64,
                current: Some(100),
            },
            0,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        signed.era,
        Era::Mortal {
            period: 64,
            phase: 36
        }
    );
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__attaches_signature_version_only_to_enums() {
    let cases = [
        (SignatureType::MultiSignature, Some(2)),
        (SignatureType::Plain, None),
    ];

    for (signature_type, expected) in cases {
        let signer = EcdsaSigner::new(
            MockChainState::new(),
            runtime(signature_type, TipPayment::Native),
        );

        let signed = signer
            .sign_ecdsa_extrinsic(&remark(), &keypair(), Some(0), EraSpec::Immortal, 0, None)
            .await
            .unwrap();

        assert_eq!(signed.signature_version, expected, "{signature_type:?}");
    }
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__rejects_asset_tip_on_native_runtime() {
    let err = signer(MockChainState::new())
        .sign_ecdsa_extrinsic(&remark(), &keypair(), Some(0), EraSpec::Immortal, 1, Some(3))
        .await
        .unwrap_err();

    assert!(matches!(err, SigningError::AssetTipUnsupported(3)));
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__carries_asset_tip() {
    let signer = EcdsaSigner::new(
        MockChainState::new(),
        runtime(SignatureType::MultiSignature, TipPayment::Asset),
    );

    let signed = signer
        .sign_ecdsa_extrinsic(&remark(), &keypair(), Some(0), EraSpec::Immortal, 5, Some(3))
        .await
        .unwrap();

    assert_eq!((signed.tip, signed.asset_id, signed.asset_tip), (5, Some(3), true));
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__propagates_nonce_failure() {
    let mut chain = MockChainState::new();
    chain
        .expect_account_nonce()
        .returning(|_| Err(anyhow::anyhow!("rpc unavailable")));

    let err = signer(chain)
        .sign_ecdsa_extrinsic(&remark(), &keypair(), None, EraSpec::Immortal, 0, None)
        .await
        .unwrap_err();

    assert!(matches!(err, SigningError::Nonce { account, .. } if account == keypair().account_id()));
}

#[tokio::test]
async fn sign_ecdsa_extrinsic__propagates_checkpoint_failure() {
    let mut chain = MockChainState::new();
    chain
        .expect_block_hash()
        .returning(|_| Err(anyhow::anyhow!("pruned")));

    let err = signer(chain)
        .sign_ecdsa_extrinsic(
            &remark(),
            &keypair(),
            Some(0),
            EraSpec::Mortal {
                period: 4,
                current: Some(10),
            },
            0,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SigningError::CheckpointHash { block: 10, .. }));
}

#[tokio::test]
async fn encoded_extrinsic_carries_signer_and_call() {
    let keypair = keypair();
    let signed = signer(MockChainState::new())
        .sign_ecdsa_extrinsic(&remark(), &keypair, Some(1), EraSpec::Immortal, 0, None)
        .await
        .unwrap();

    let encoded = signed.encode_extrinsic();

    let (len, prefix) = codec::decode_compact(&encoded).unwrap();
    let body = &encoded[prefix..];
    assert_eq!(len as usize, body.len());
    assert_eq!(body[0], SIGNED_EXTRINSIC_VERSION);
    assert_eq!(&body[2..34], keypair.account_id().as_ref());
    assert_eq!(body[34], 2);
    assert_eq!(&body[35..100], signed.signature.as_slice());
    assert!(body.ends_with(&remark().encoded));
}

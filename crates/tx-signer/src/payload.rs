use pc_e2e_types::{
    codec,
    crypto::blake2_256,
    extrinsic::{
        Era,
        SignatureType,
    },
    Bytes32,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Longer signing payloads are replaced by their BLAKE2b-256 digest.
pub const MAX_UNHASHED_PAYLOAD_LEN: usize = 256;

/// How the runtime charges transaction tips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipPayment {
    /// `ChargeTransactionPayment`: a compact tip in the native token.
    #[default]
    Native,
    /// `ChargeAssetTxPayment`: a compact tip followed by an optional asset id.
    Asset,
}

/// Runtime facts that end up in every signing payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeContext {
    pub genesis_hash: Bytes32,
    pub spec_version: u32,
    pub transaction_version: u32,
    /// Whether `ExtrinsicSignature` is an enum over schemes.
    pub signature_type: SignatureType,
    #[serde(default)]
    pub tip_payment: TipPayment,
}

/// The bytes a wallet signs for a call.
///
/// The signed extra (era, nonce, tip and, for asset tips, the asset id) is
/// followed by the implicitly signed runtime versions, the genesis hash and
/// the hash of the era's checkpoint block.
pub fn signing_payload(
    call: &[u8],
    era: &Era,
    nonce: u64,
    tip: u128,
    tip_asset_id: Option<u128>,
    runtime: &RuntimeContext,
    checkpoint: &Bytes32,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(call.len() + 128);
    payload.extend_from_slice(call);
    era.encode_to(&mut payload);
    codec::encode_compact(nonce, &mut payload);
    codec::encode_compact(tip, &mut payload);
    if runtime.tip_payment == TipPayment::Asset {
        codec::encode_option_u128(tip_asset_id, &mut payload);
    }
    payload.extend_from_slice(&runtime.spec_version.to_le_bytes());
    payload.extend_from_slice(&runtime.transaction_version.to_le_bytes());
    payload.extend_from_slice(runtime.genesis_hash.as_ref());
    payload.extend_from_slice(checkpoint.as_ref());

    if payload.len() > MAX_UNHASHED_PAYLOAD_LEN {
        blake2_256(&payload).to_vec()
    } else {
        payload
    }
}

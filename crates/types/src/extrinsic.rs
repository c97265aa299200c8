//! Signed transaction envelope types.

use crate::{
    codec,
    committee::SignatureScheme,
    primitives::Bytes32,
    serde_hex,
};
use serde::{
    Deserialize,
    Serialize,
};

mod era;

pub use era::{
    Era,
    EraSpec,
};

/// Version byte of a signed version-4 extrinsic.
pub const SIGNED_EXTRINSIC_VERSION: u8 = 0x84;

/// Variant index of `MultiAddress::Id`.
const MULTI_ADDRESS_ID: u8 = 0x00;

/// A runtime call, addressed by module and function, with its encoded form.
///
/// Encoding calls requires runtime metadata, so the encoded bytes are supplied
/// together with the readable description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Call {
    /// Pallet name, e.g. `Balances`.
    pub call_module: String,
    /// Call name, e.g. `transfer_allow_death`.
    pub call_function: String,
    /// Call arguments as reported by the metadata layer.
    #[serde(default)]
    pub call_args: serde_json::Value,
    /// SCALE encoded call, pallet and call index included.
    #[serde(with = "serde_hex")]
    pub encoded: Vec<u8>,
}

/// How the runtime declares `ExtrinsicSignature`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureType {
    /// An enum over several schemes; signatures carry a version byte.
    MultiSignature,
    /// A single scheme; signatures are written without a version byte.
    Plain,
}

impl SignatureType {
    /// Signature version to attach for `scheme`, if the type needs one.
    pub fn signature_version(&self, scheme: SignatureScheme) -> Option<u8> {
        match self {
            SignatureType::MultiSignature => Some(scheme.signature_version()),
            SignatureType::Plain => None,
        }
    }
}

/// A signed transaction ready to be encoded and submitted once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransactionPayload {
    /// BLAKE2b-256 of the signer's public key.
    pub account_id: Bytes32,
    /// Recoverable signature over the signing payload digest.
    #[serde(with = "serde_hex")]
    pub signature: Vec<u8>,
    /// Scheme discriminant, present only for enum signature types.
    pub signature_version: Option<u8>,
    /// Pallet name of the call.
    pub call_module: String,
    /// Function name of the call.
    pub call_function: String,
    /// Call arguments.
    pub call_args: serde_json::Value,
    /// Account nonce.
    pub nonce: u64,
    /// Transaction lifetime.
    pub era: Era,
    /// Tip paid to the block author.
    pub tip: u128,
    /// Asset the tip is paid in, when the runtime charges tips in assets.
    pub asset_id: Option<u128>,
    /// Whether the runtime's signed extra carries the tip asset.
    pub asset_tip: bool,
    /// Encoded call.
    #[serde(with = "serde_hex")]
    pub call: Vec<u8>,
}

impl SignedTransactionPayload {
    /// The signed extra: era, nonce, tip and the optional tip asset.
    pub fn encode_extra(&self, out: &mut Vec<u8>) {
        self.era.encode_to(out);
        codec::encode_compact(self.nonce, out);
        codec::encode_compact(self.tip, out);
        if self.asset_tip {
            codec::encode_option_u128(self.asset_id, out);
        }
    }

    /// Encodes the version-4 signed extrinsic, length prefix included.
    pub fn encode_extrinsic(&self) -> Vec<u8> {
        let mut body = vec![SIGNED_EXTRINSIC_VERSION, MULTI_ADDRESS_ID];
        body.extend_from_slice(self.account_id.as_ref());
        if let Some(version) = self.signature_version {
            body.push(version);
        }
        body.extend_from_slice(&self.signature);
        self.encode_extra(&mut body);
        body.extend_from_slice(&self.call);

        let mut out = Vec::with_capacity(body.len() + 4);
        codec::encode_bytes(&body, &mut out);
        out
    }
}

//! Committee members and the signature schemes they author blocks with.

use crate::crypto;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

/// Signature scheme of a committee member or wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    /// Schnorr signatures over Ristretto25519.
    #[serde(alias = "SR25519", alias = "Sr25519")]
    Sr25519,
    /// Edwards-curve signatures over Curve25519.
    #[serde(alias = "ED25519", alias = "Ed25519")]
    Ed25519,
    /// Recoverable secp256k1 signatures over a BLAKE2b-256 prehash.
    #[serde(alias = "ECDSA", alias = "Ecdsa")]
    Ecdsa,
}

impl SignatureScheme {
    /// Verifies `signature` over `message` for `public_key` with this scheme.
    ///
    /// Malformed keys or signatures never verify.
    pub fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        match self {
            SignatureScheme::Sr25519 => {
                crypto::sr25519_verify(message, signature, public_key)
            }
            SignatureScheme::Ed25519 => {
                crypto::ed25519_verify(message, signature, public_key)
            }
            SignatureScheme::Ecdsa => crypto::ecdsa_verify(message, signature, public_key),
        }
    }

    /// Variant index of the scheme in the runtime's `MultiSignature` enum.
    pub const fn signature_version(&self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => 0,
            SignatureScheme::Sr25519 => 1,
            SignatureScheme::Ecdsa => 2,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureScheme::Sr25519 => "sr25519",
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Ecdsa => "ecdsa",
        };
        f.write_str(name)
    }
}

/// A block-authoring key of one committee member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    /// Raw public key bytes.
    #[serde(with = "crate::serde_hex")]
    pub public_key: Vec<u8>,
    /// Scheme the key signs with.
    pub scheme: SignatureScheme,
}

impl CommitteeMember {
    /// Creates a committee member.
    pub fn new(public_key: impl Into<Vec<u8>>, scheme: SignatureScheme) -> Self {
        Self {
            public_key: public_key.into(),
            scheme,
        }
    }

    /// Returns `true` if this member signed `message`.
    pub fn signed(&self, message: &[u8], signature: &[u8]) -> bool {
        self.scheme.verify(message, signature, &self.public_key)
    }
}

impl fmt::Display for CommitteeMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:0x{}", self.scheme, hex::encode(&self.public_key))
    }
}

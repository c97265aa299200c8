//! Deterministic keys that sign the way block authors and wallets do.

use crate::{
    committee::{
        CommitteeMember,
        SignatureScheme,
    },
    crypto::{
        blake2_256,
        SR25519_SIGNING_CONTEXT,
    },
};
use ed25519_dalek::Signer;

/// A signing key of any supported scheme, derived from a one byte seed.
#[derive(Clone, Debug)]
pub struct TestSigner {
    scheme: SignatureScheme,
    secret: [u8; 32],
}

impl TestSigner {
    /// Creates a signer whose secret is `seed` repeated 32 times.
    ///
    /// `seed` must be non-zero to be a valid secp256k1 scalar.
    pub fn new(scheme: SignatureScheme, seed: u8) -> Self {
        assert_ne!(seed, 0, "zero is not a valid secret");
        Self {
            scheme,
            secret: [seed; 32],
        }
    }

    /// Scheme of the key.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Raw secret bytes.
    pub fn secret(&self) -> [u8; 32] {
        self.secret
    }

    /// Public key in the chain's format.
    pub fn public_key(&self) -> Vec<u8> {
        match self.scheme {
            SignatureScheme::Sr25519 => self.sr25519().public.to_bytes().to_vec(),
            SignatureScheme::Ed25519 => self.ed25519().verifying_key().to_bytes().to_vec(),
            SignatureScheme::Ecdsa => self
                .ecdsa()
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        }
    }

    /// Signs `message` the way the chain expects for this scheme.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self.scheme {
            SignatureScheme::Sr25519 => self
                .sr25519()
                .sign_simple(SR25519_SIGNING_CONTEXT, message)
                .to_bytes()
                .to_vec(),
            SignatureScheme::Ed25519 => self.ed25519().sign(message).to_bytes().to_vec(),
            SignatureScheme::Ecdsa => {
                let (signature, recovery_id) = self
                    .ecdsa()
                    .sign_prehash_recoverable(&blake2_256(message))
                    .expect("prehash has the expected length");
                let mut bytes = signature.to_bytes().to_vec();
                bytes.push(recovery_id.to_byte());
                bytes
            }
        }
    }

    /// The key as a committee member.
    pub fn member(&self) -> CommitteeMember {
        CommitteeMember::new(self.public_key(), self.scheme)
    }

    fn sr25519(&self) -> schnorrkel::Keypair {
        schnorrkel::MiniSecretKey::from_bytes(&self.secret)
            .expect("32 bytes is a valid mini secret key")
            .expand_to_keypair(schnorrkel::ExpansionMode::Ed25519)
    }

    fn ed25519(&self) -> ed25519_dalek::SigningKey {
        ed25519_dalek::SigningKey::from_bytes(&self.secret)
    }

    fn ecdsa(&self) -> k256::ecdsa::SigningKey {
        k256::ecdsa::SigningKey::from_slice(&self.secret)
            .expect("non-zero seed is a valid scalar")
    }
}

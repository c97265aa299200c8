use crate::{
    Result,
    SigningError,
};
use k256::ecdsa::SigningKey;
use pc_e2e_types::{
    crypto::{
        blake2_256,
        ECDSA_PUBLIC_KEY_LENGTH,
        ECDSA_SIGNATURE_LENGTH,
    },
    serde_hex,
    Bytes32,
};
use std::fmt;

/// A secp256k1 wallet key.
#[derive(Clone)]
pub struct EcdsaKeypair {
    secret: SigningKey,
}

impl EcdsaKeypair {
    pub fn generate() -> Self {
        Self {
            secret: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    pub fn from_secret_bytes(secret: &[u8]) -> Result<Self> {
        let secret =
            SigningKey::from_slice(secret).map_err(|_| SigningError::InvalidSecretKey)?;
        Ok(Self { secret })
    }

    /// Compressed SEC1 public key.
    pub fn public_key(&self) -> [u8; ECDSA_PUBLIC_KEY_LENGTH] {
        let point = self.secret.verifying_key().to_encoded_point(true);
        let mut public_key = [0; ECDSA_PUBLIC_KEY_LENGTH];
        public_key.copy_from_slice(point.as_bytes());
        public_key
    }

    /// The on-chain account of the key: BLAKE2b-256 of the compressed public
    /// key.
    pub fn account_id(&self) -> Bytes32 {
        Bytes32::new(blake2_256(&self.public_key()))
    }

    /// Signs the BLAKE2b-256 digest of `message`, returning `r || s || v`.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; ECDSA_SIGNATURE_LENGTH]> {
        let (signature, recovery_id) =
            self.secret.sign_prehash_recoverable(&blake2_256(message))?;
        let mut bytes = [0; ECDSA_SIGNATURE_LENGTH];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte();
        Ok(bytes)
    }
}

impl fmt::Debug for EcdsaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaKeypair")
            .field("public_key", &serde_hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

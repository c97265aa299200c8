//! Hashing and signature primitives of the partner chain.

use blake2::{
    digest::consts::U32,
    Blake2b,
    Digest,
};
use ed25519_dalek::Verifier;
use k256::ecdsa::{
    RecoveryId,
    Signature as EcdsaSignature,
    VerifyingKey as EcdsaVerifyingKey,
};

/// BLAKE2b with a 256-bit output, the chain's fixed hash function.
pub type Blake2b256 = Blake2b<U32>;

/// Signing context the chain uses for sr25519 signatures.
pub const SR25519_SIGNING_CONTEXT: &[u8] = b"substrate";

/// Length of a compressed secp256k1 public key.
pub const ECDSA_PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a recoverable secp256k1 signature, `r || s || v`.
pub const ECDSA_SIGNATURE_LENGTH: usize = 65;

/// Hashes `data` with BLAKE2b-256.
pub fn blake2_256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

/// Verifies an sr25519 signature made with the chain signing context.
pub fn sr25519_verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(public_key) = schnorrkel::PublicKey::from_bytes(public_key) else {
        return false
    };
    let Ok(signature) = schnorrkel::Signature::from_bytes(signature) else {
        return false
    };
    public_key
        .verify_simple(SR25519_SIGNING_CONTEXT, message, &signature)
        .is_ok()
}

/// Verifies an ed25519 signature.
pub fn ed25519_verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(public_key) = <&[u8; 32]>::try_from(public_key) else {
        return false
    };
    let Ok(public_key) = ed25519_dalek::VerifyingKey::from_bytes(public_key) else {
        return false
    };
    let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
        return false
    };
    public_key.verify(message, &signature).is_ok()
}

/// Verifies a recoverable secp256k1 signature.
///
/// The message is hashed with BLAKE2b-256 before recovery, and the recovered
/// key must equal the compressed `public_key`.
pub fn ecdsa_verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    ecdsa_recover(&blake2_256(message), signature)
        .is_some_and(|recovered| recovered.as_slice() == public_key)
}

/// Recovers the compressed public key that produced `signature` over `prehash`.
pub fn ecdsa_recover(
    prehash: &[u8; 32],
    signature: &[u8],
) -> Option<[u8; ECDSA_PUBLIC_KEY_LENGTH]> {
    if signature.len() != ECDSA_SIGNATURE_LENGTH {
        return None
    }
    let v = signature[64];
    let recovery_id = RecoveryId::from_byte(if v > 26 { v - 27 } else { v })?;
    let signature = EcdsaSignature::from_slice(&signature[..64]).ok()?;
    let key =
        EcdsaVerifyingKey::recover_from_prehash(prehash, &signature, recovery_id).ok()?;
    key.to_encoded_point(true).as_bytes().try_into().ok()
}
